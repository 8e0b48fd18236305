//! Package, interface and method model.

use std::{collections::BTreeSet, io};

use serde::Serialize;

use crate::{Error, FullImportPaths, Result, Type};

/// A package holding the interfaces to mock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Package name (e.g., "store")
    pub name: String,
    /// Import path of the package, if known (e.g., "github.com/acme/store")
    pub path: Option<String>,
    /// Packages imported with `import . "path"`
    pub dot_imports: Vec<String>,
    pub interfaces: Vec<Interface>,
}

/// An interface with its methods in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub name: String,
    pub methods: Vec<Method>,
}

/// A single interface method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub params: Vec<Parameter>,
    pub variadic: Option<Parameter>,
    pub results: Vec<Parameter>,
}

/// A method parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Declared name; results are usually unnamed
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self { name: None, ty }
    }
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            variadic: None,
            results: Vec::new(),
        }
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn variadic(mut self, param: Parameter) -> Self {
        self.variadic = Some(param);
        self
    }

    pub fn result(mut self, ty: Type) -> Self {
        self.results.push(Parameter::unnamed(ty));
        self
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Every parameter and result, variadic included.
    pub fn all_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params
            .iter()
            .chain(self.variadic.iter())
            .chain(self.results.iter())
    }

    fn print(&self, w: &mut dyn io::Write) -> io::Result<()> {
        writeln!(w, "  - method {}", self.name)?;
        if !self.params.is_empty() {
            writeln!(w, "    in:")?;
            for p in &self.params {
                p.print(w)?;
            }
        }
        if let Some(v) = &self.variadic {
            writeln!(w, "    ...:")?;
            v.print(w)?;
        }
        if !self.results.is_empty() {
            writeln!(w, "    out:")?;
            for p in &self.results {
                p.print(w)?;
            }
        }
        Ok(())
    }
}

impl Parameter {
    fn print(&self, w: &mut dyn io::Write) -> io::Result<()> {
        let name = self.name.as_deref().unwrap_or("\"\"");
        writeln!(
            w,
            "    - {}: {}",
            name,
            self.ty.render(&FullImportPaths, None)
        )
    }
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Import paths referenced by the types of every method.
    pub fn imports(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for method in &self.methods {
            for param in method.all_params() {
                param.ty.collect_imports(&mut out);
            }
        }
        out
    }

    fn print(&self, w: &mut dyn io::Write) -> io::Result<()> {
        writeln!(w, "interface {}", self.name)?;
        for m in &self.methods {
            m.print(w)?;
        }
        Ok(())
    }
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            dot_imports: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn interface(mut self, interface: Interface) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Import paths required by all interfaces, sorted and deduplicated.
    pub fn imports(&self) -> BTreeSet<String> {
        self.interfaces
            .iter()
            .flat_map(|iface| iface.imports())
            .collect()
    }

    /// Names of all interfaces in declaration order.
    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(|i| i.name.as_str()).collect()
    }

    /// Keep only the named interfaces, in the order they are requested.
    ///
    /// A name given more than once selects its interface once.
    pub fn select_interfaces(mut self, names: &[String]) -> Result<Self> {
        let mut selected: Vec<Interface> = Vec::with_capacity(names.len());
        for name in names {
            if selected.iter().any(|i| &i.name == name) {
                continue;
            }
            let pos = self
                .interfaces
                .iter()
                .position(|i| &i.name == name)
                .ok_or_else(|| {
                    Box::new(Error::UnknownInterface {
                        name: name.clone(),
                        available: self.interface_names().join(", "),
                    })
                })?;
            selected.push(self.interfaces.remove(pos));
        }
        self.interfaces = selected;
        Ok(self)
    }

    /// Write a readable dump of the model.
    pub fn print(&self, w: &mut dyn io::Write) -> io::Result<()> {
        writeln!(w, "package {}", self.name)?;
        for iface in &self.interfaces {
            iface.print(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_package() -> Package {
        Package::new("store")
            .interface(
                Interface::new("Store").method(
                    Method::new("Get")
                        .param(Parameter::new("ctx", Type::qualified("context", "Context")))
                        .param(Parameter::unnamed(Type::predeclared("string")))
                        .result(Type::predeclared("string"))
                        .result(Type::predeclared("error")),
                ),
            )
            .interface(
                Interface::new("Handler").method(
                    Method::new("ServeHTTP")
                        .param(Parameter::new(
                            "w",
                            Type::qualified("net/http", "ResponseWriter"),
                        ))
                        .param(Parameter::new(
                            "r",
                            Type::pointer(Type::qualified("net/http", "Request")),
                        )),
                ),
            )
    }

    #[test]
    fn test_package_imports_are_deduplicated_and_sorted() {
        let imports: Vec<_> = store_package().imports().into_iter().collect();
        assert_eq!(imports, vec!["context", "net/http"]);
    }

    #[test]
    fn test_variadic_types_contribute_imports() {
        let iface = Interface::new("Logger").method(
            Method::new("Log").variadic(Parameter::new(
                "fields",
                Type::qualified("go.uber.org/zap", "Field"),
            )),
        );
        assert!(iface.imports().contains("go.uber.org/zap"));
    }

    #[test]
    fn test_select_interfaces_keeps_requested_order() {
        let pkg = store_package()
            .select_interfaces(&["Handler".to_string(), "Store".to_string()])
            .unwrap();
        assert_eq!(pkg.interface_names(), vec!["Handler", "Store"]);
    }

    #[test]
    fn test_select_repeated_interface_once() {
        let pkg = store_package()
            .select_interfaces(&["Store".to_string(), "Store".to_string()])
            .unwrap();
        assert_eq!(pkg.interface_names(), vec!["Store"]);
    }

    #[test]
    fn test_select_unknown_interface_fails() {
        let err = store_package()
            .select_interfaces(&["Missing".to_string()])
            .unwrap_err();
        assert!(matches!(*err, Error::UnknownInterface { ref name, .. } if name == "Missing"));
    }

    #[test]
    fn test_print_dump() {
        let mut out = Vec::new();
        store_package().print(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("package store\ninterface Store\n"));
        assert!(out.contains("  - method Get\n    in:\n    - ctx: context.Context\n"));
        assert!(out.contains("    - \"\": string\n"));
        assert!(out.contains("    out:\n    - \"\": string\n    - \"\": error\n"));
        assert!(out.contains("    - r: *net/http.Request\n"));
    }
}
