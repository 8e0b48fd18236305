//! Interface model for the mockgen mock generator.
//!
//! The code generator consumes a [`Package`]: a set of Go interfaces with
//! their methods, parameter types and the imports those types need. This
//! crate defines that model, renders its types as Go source text, and loads
//! it from `mockgen.toml` model files.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod keywords;
pub mod manifest;
mod package;
mod type_expr;
mod types;

pub use error::{Error, Result, SourceContext};
pub use keywords::{
    GENERATED_LOCALS, GO_KEYWORDS, is_generated_local, is_go_keyword, validate_identifier,
};
pub use manifest::{FormatterKind, GenerateSection, MockToml, Model, parse_str};
pub use package::{Interface, Method, Package, Parameter};
pub use type_expr::{TypeExprError, TypeScope, parse_type};
pub use types::{
    ChanDir, FullImportPaths, FuncType, PREDECLARED_TYPES, PackageAliases, Type, is_predeclared,
};
