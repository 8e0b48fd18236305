//! Model file types and parsing for `mockgen.toml` files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::MockToml;
use indexmap::IndexMap;
pub use parse::{parse_str, parse_str_with_filename};
use serde::{Deserialize, Serialize};
pub use validate::ParseContext;

use crate::Package;

/// Root of a `mockgen.toml` model file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    /// The package declaring the interfaces
    pub package: PackageSection,

    /// Import qualifier -> import path, in declaration order
    #[serde(default)]
    pub imports: IndexMap<String, String>,

    /// Generation defaults, overridable from the command line
    #[serde(default)]
    pub generate: GenerateSection,

    #[serde(default)]
    pub interfaces: Vec<InterfaceDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    pub name: String,
    /// Import path, used to qualify the package's own named types
    pub path: Option<String>,
    #[serde(default)]
    pub dot_imports: Vec<String>,
}

/// `[generate]` table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    /// Package name for the generated file
    pub package: Option<String>,
    /// Import path of the package the mocks are generated into
    pub self_package: Option<String>,
    /// Import path of the mock runtime
    pub runtime: Option<String>,
    /// Output file path
    pub output: Option<PathBuf>,
    pub formatter: Option<FormatterKind>,
}

/// Which formatter post-processes generated source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Built-in canonicalizer
    #[default]
    Canonical,
    /// External `gofmt` binary
    Gofmt,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDecl {
    pub name: String,
    /// Embedded interfaces; declared so they can be rejected with a clear error
    #[serde(default)]
    pub embeds: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    pub variadic: Option<ParamDecl>,
    #[serde(default)]
    pub results: Vec<ParamDecl>,
}

/// A parameter written either as a bare type or as `{ name, type }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParamDecl {
    Type(String),
    Full {
        name: Option<String>,
        #[serde(rename = "type")]
        ty: String,
    },
}

impl ParamDecl {
    pub fn name(&self) -> Option<&str> {
        match self {
            ParamDecl::Type(_) => None,
            ParamDecl::Full { name, .. } => name.as_deref().filter(|n| !n.is_empty()),
        }
    }

    pub fn type_expr(&self) -> &str {
        match self {
            ParamDecl::Type(ty) => ty,
            ParamDecl::Full { ty, .. } => ty,
        }
    }
}

/// A validated model: the interface package plus generation defaults.
#[derive(Debug, Clone)]
pub struct Model {
    pub package: Package,
    pub generate: GenerateSection,
}
