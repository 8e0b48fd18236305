//! Core utilities and types for the mockgen mock generator.
//!
//! This crate provides the pieces shared by the model, the code generator
//! and the command line tool: writing generated files and a few Go-flavoured
//! string helpers.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult};
// String utilities
pub use utils::{go_quote, mock_file_name, path_base};
