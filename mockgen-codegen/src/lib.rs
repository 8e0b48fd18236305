//! Mock code generation for Go interfaces.
//!
//! Turns a [`mockgen_model::Package`] into Go source containing, for each
//! interface, a mock type whose methods forward to the mocking runtime and
//! a verifier type for asserting how the mock was called.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented Go source buffer ([`CodeBuilder`])
//! - [`AliasMap`] - Collision-free aliases for generated imports
//! - [`Signature`] - Rendered parameter lists and return clauses
//! - [`Generator`] - Assembles a complete mock file
//! - [`SourceFormatter`] - Built-in [`Canonical`] layout or external [`Gofmt`]

pub mod builder;
mod format;
mod generator;
mod imports;
mod mock;
mod naming;
mod runtime;
mod signature;
mod verifier;

pub use builder::CodeBuilder;
pub use format::{Canonical, FormatError, Gofmt, SourceFormatter, formatter_for};
pub use generator::{GenerateOptions, Generator, Source};
pub use imports::AliasMap;
pub use naming::{GO_NAMING, NamingConvention};
pub use runtime::{DEFAULT_RUNTIME_IMPORT, Runtime};
pub use signature::Signature;
