//! Go type model and its text rendering.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

/// Go's predeclared type names.
pub const PREDECLARED_TYPES: &[&str] = &[
    "any", "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int",
    "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32",
    "uint64", "uintptr",
];

/// Check if a name is one of Go's predeclared types
pub fn is_predeclared(name: &str) -> bool {
    PREDECLARED_TYPES.contains(&name)
}

/// Lookup from an import path to the local alias used in generated code.
pub trait PackageAliases {
    /// The alias for `import_path`, or `None` if the path is not imported.
    fn alias_for<'a>(&'a self, import_path: &'a str) -> Option<&'a str>;
}

impl PackageAliases for BTreeMap<String, String> {
    fn alias_for<'a>(&'a self, import_path: &'a str) -> Option<&'a str> {
        self.get(import_path).map(String::as_str)
    }
}

impl PackageAliases for HashMap<String, String> {
    fn alias_for<'a>(&'a self, import_path: &'a str) -> Option<&'a str> {
        self.get(import_path).map(String::as_str)
    }
}

/// Qualifies every imported type with its full import path.
///
/// Used for debug output where no alias map exists yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullImportPaths;

impl PackageAliases for FullImportPaths {
    fn alias_for<'a>(&'a self, import_path: &'a str) -> Option<&'a str> {
        Some(import_path)
    }
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A function signature used as a type (`func(int) error`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FuncType {
    pub params: Vec<Type>,
    pub variadic: Option<Box<Type>>,
    pub results: Vec<Type>,
}

/// A Go type as it appears in a method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// A predeclared type such as `int` or `error`.
    Predeclared(String),
    /// A named type, qualified by its import path unless it is unqualified.
    Named {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array {
        len: u64,
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<Type>,
    },
    Func(FuncType),
    /// The empty interface `interface{}`.
    Interface,
    /// The empty struct `struct{}`.
    Struct,
}

impl Type {
    pub fn predeclared(name: impl Into<String>) -> Self {
        Self::Predeclared(name.into())
    }

    /// A named type living in the package at `import_path`.
    pub fn qualified(import_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            package: Some(import_path.into()),
            name: name.into(),
        }
    }

    /// A named type with no package qualifier.
    pub fn local(name: impl Into<String>) -> Self {
        Self::Named {
            package: None,
            name: name.into(),
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Self::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Type) -> Self {
        Self::Slice(Box::new(elem))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Render the type as Go source text.
    ///
    /// Types from `local_package` are written unqualified; other imported
    /// types are prefixed with their alias from `aliases`.
    pub fn render<A>(&self, aliases: &A, local_package: Option<&str>) -> String
    where
        A: PackageAliases + ?Sized,
    {
        match self {
            Type::Predeclared(name) => name.clone(),
            Type::Named { package, name } => match package.as_deref() {
                Some(pkg) if Some(pkg) == local_package => name.clone(),
                Some(pkg) => match aliases.alias_for(pkg) {
                    Some(alias) if !alias.is_empty() => format!("{}.{}", alias, name),
                    _ => name.clone(),
                },
                None => name.clone(),
            },
            Type::Pointer(elem) => format!("*{}", elem.render(aliases, local_package)),
            Type::Slice(elem) => format!("[]{}", elem.render(aliases, local_package)),
            Type::Array { len, elem } => {
                format!("[{}]{}", len, elem.render(aliases, local_package))
            }
            Type::Map { key, value } => format!(
                "map[{}]{}",
                key.render(aliases, local_package),
                value.render(aliases, local_package)
            ),
            Type::Chan { dir, elem } => {
                let elem_str = elem.render(aliases, local_package);
                match dir {
                    // `chan (<-chan T)` needs parens to stay unambiguous
                    ChanDir::Both if matches!(**elem, Type::Chan { dir: ChanDir::Recv, .. }) => {
                        format!("chan ({})", elem_str)
                    }
                    ChanDir::Both => format!("chan {}", elem_str),
                    ChanDir::Send => format!("chan<- {}", elem_str),
                    ChanDir::Recv => format!("<-chan {}", elem_str),
                }
            }
            Type::Func(func) => format!("func{}", func.render(aliases, local_package)),
            Type::Interface => "interface{}".to_string(),
            Type::Struct => "struct{}".to_string(),
        }
    }

    /// Add every import path referenced by this type to `out`.
    pub fn collect_imports(&self, out: &mut BTreeSet<String>) {
        match self {
            Type::Predeclared(_) | Type::Interface | Type::Struct => {}
            Type::Named { package, .. } => {
                if let Some(pkg) = package {
                    out.insert(pkg.clone());
                }
            }
            Type::Pointer(elem) | Type::Slice(elem) => elem.collect_imports(out),
            Type::Array { elem, .. } | Type::Chan { elem, .. } => elem.collect_imports(out),
            Type::Map { key, value } => {
                key.collect_imports(out);
                value.collect_imports(out);
            }
            Type::Func(func) => {
                for t in func.params.iter().chain(func.results.iter()) {
                    t.collect_imports(out);
                }
                if let Some(v) = &func.variadic {
                    v.collect_imports(out);
                }
            }
        }
    }
}

impl FuncType {
    /// Render the parameter and result lists, e.g. `(int, ...string) error`.
    pub fn render<A>(&self, aliases: &A, local_package: Option<&str>) -> String
    where
        A: PackageAliases + ?Sized,
    {
        let mut params: Vec<String> = self
            .params
            .iter()
            .map(|t| t.render(aliases, local_package))
            .collect();
        if let Some(v) = &self.variadic {
            params.push(format!("...{}", v.render(aliases, local_package)));
        }

        let results: Vec<String> = self
            .results
            .iter()
            .map(|t| t.render(aliases, local_package))
            .collect();
        let results = match results.len() {
            0 => String::new(),
            1 => format!(" {}", results[0]),
            _ => format!(" ({})", results.join(", ")),
        };

        format!("({}){}", params.join(", "), results)
    }
}
