//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Append-only buffer of indented Go source lines

mod code_builder;

pub use code_builder::CodeBuilder;
