//! Assembles complete mock files from a [`Package`].

use std::fmt;

use mockgen_core::go_quote;
use mockgen_model::{Method, Package};

use crate::{
    AliasMap,
    builder::CodeBuilder,
    format::{FormatError, SourceFormatter},
    mock::emit_mock,
    naming::{GO_NAMING, NamingConvention},
    runtime::{DEFAULT_RUNTIME_IMPORT, Runtime},
    signature::Signature,
    verifier::emit_verifier,
};

/// Where the mocked interfaces came from, recorded in the file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A model file, rendered as its path.
    File(String),
    /// Selected interfaces of a package, rendered as
    /// `<path> (interfaces: A,B)`.
    Package {
        path: String,
        interfaces: Vec<String>,
    },
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path),
            Source::Package { path, interfaces } => {
                write!(f, "{} (interfaces: {})", path, interfaces.join(","))
            }
        }
    }
}

/// Settings for a single generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Package clause of the generated file
    pub package_out: String,
    /// Import path of the package the mocks are generated into; its types
    /// are written unqualified and it is left out of the import block
    pub self_package: Option<String>,
    /// Import path of the mocking runtime
    pub runtime_import: String,
}

impl GenerateOptions {
    /// Defaults for `package`: mocks go into `<name>_test`.
    pub fn for_package(package: &Package) -> Self {
        Self {
            package_out: format!("{}_test", package.name),
            self_package: None,
            runtime_import: DEFAULT_RUNTIME_IMPORT.to_string(),
        }
    }

    pub fn with_package_out(mut self, package_out: impl Into<String>) -> Self {
        self.package_out = package_out.into();
        self
    }

    pub fn with_self_package(mut self, self_package: impl Into<String>) -> Self {
        self.self_package = Some(self_package.into());
        self
    }

    pub fn with_runtime_import(mut self, runtime_import: impl Into<String>) -> Self {
        self.runtime_import = runtime_import.into();
        self
    }
}

/// Shared state handed to the mock and verifier emitters.
pub(crate) struct EmitContext<'a> {
    pub aliases: &'a AliasMap,
    pub runtime: &'a Runtime,
    pub local_package: Option<&'a str>,
    pub naming: &'a NamingConvention,
}

impl EmitContext<'_> {
    pub fn signature(&self, method: &Method) -> Signature {
        Signature::build(method, self.aliases, self.local_package)
    }
}

/// Generates the mock file for every interface of a package.
///
/// # Example
///
/// ```
/// use mockgen_codegen::{Canonical, GenerateOptions, Generator, Source};
/// use mockgen_model::{Interface, Method, Package};
///
/// let package = Package::new("io").interface(Interface::new("Closer").method(Method::new("Close")));
/// let options = GenerateOptions::for_package(&package);
/// let generator = Generator::new(&package, Source::File("io.toml".into()), options);
///
/// let output = generator.generate(&Canonical).unwrap();
/// assert!(output.starts_with(b"// Automatically generated by MockGen. DO NOT EDIT!\n"));
/// ```
#[derive(Debug)]
pub struct Generator<'a> {
    package: &'a Package,
    source: Source,
    options: GenerateOptions,
}

impl<'a> Generator<'a> {
    pub fn new(package: &'a Package, source: Source, options: GenerateOptions) -> Self {
        Self {
            package,
            source,
            options,
        }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Aliases for every package the generated file refers to.
    ///
    /// Dot-imported packages are left out; their types render unqualified.
    pub fn aliases(&self) -> AliasMap {
        let mut paths = self.package.imports();
        paths.insert(self.options.runtime_import.clone());
        for dot in &self.package.dot_imports {
            paths.remove(dot);
        }
        AliasMap::resolve(paths)
    }

    /// Render the unformatted source text.
    pub fn render(&self) -> String {
        let aliases = self.aliases();
        let self_package = self.options.self_package.as_deref();
        let runtime = Runtime::resolve(&self.options.runtime_import, &aliases, self_package);
        let ctx = EmitContext {
            aliases: &aliases,
            runtime: &runtime,
            local_package: self_package,
            naming: &GO_NAMING,
        };

        let mut b = CodeBuilder::go();
        b.push_comment("Automatically generated by MockGen. DO NOT EDIT!")
            .push_comment(&format!("Source: {}", self.source))
            .push_blank()
            .push_line(&format!("package {}", self.options.package_out))
            .push_blank();

        let mut imports: Vec<String> = aliases
            .iter()
            .filter(|(path, _)| Some(*path) != self_package)
            .map(|(path, alias)| format!("{} {}", alias, go_quote(path)))
            .collect();
        imports.extend(
            self.package
                .dot_imports
                .iter()
                .map(|path| format!(". {}", go_quote(path))),
        );
        if !imports.is_empty() {
            b.push_block_with_close("import (", ")", |b| {
                for import in &imports {
                    b.push_line(import);
                }
            });
        }

        for iface in &self.package.interfaces {
            tracing::debug!(interface = %iface.name, methods = iface.methods.len(), "emitting mock");
            b.push_blank();
            emit_mock(&ctx, iface, &mut b);
            emit_verifier(&ctx, iface, &mut b);
        }

        b.build()
    }

    /// Render and format the complete file.
    ///
    /// Nothing is returned if the formatter rejects the text.
    pub fn generate(&self, formatter: &dyn SourceFormatter) -> Result<Vec<u8>, FormatError> {
        let raw = self.render();
        let formatted = formatter.format(&raw)?;
        tracing::debug!(
            formatter = formatter.name(),
            bytes = formatted.len(),
            "formatted mock source"
        );
        Ok(formatted.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use mockgen_model::{Interface, Parameter, Type};

    use super::*;
    use crate::Canonical;

    fn store_package() -> Package {
        Package {
            name: "store".to_string(),
            path: Some("github.com/acme/store".to_string()),
            dot_imports: Vec::new(),
            interfaces: vec![
                Interface::new("Store").method(
                    Method::new("Get")
                        .param(Parameter::new("ctx", Type::qualified("context", "Context")))
                        .result(Type::pointer(Type::qualified("github.com/acme/store", "Item")))
                        .result(Type::predeclared("error")),
                ),
            ],
        }
    }

    fn generator(package: &Package) -> Generator<'_> {
        Generator::new(
            package,
            Source::File("store.toml".to_string()),
            GenerateOptions::for_package(package),
        )
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::File("a/b.go".into()).to_string(), "a/b.go");
        let source = Source::Package {
            path: "github.com/acme/store".into(),
            interfaces: vec!["Store".into(), "Cache".into()],
        };
        assert_eq!(
            source.to_string(),
            "github.com/acme/store (interfaces: Store,Cache)"
        );
    }

    #[test]
    fn test_default_options() {
        let options = GenerateOptions::for_package(&Package::new("store"));
        assert_eq!(options.package_out, "store_test");
        assert_eq!(options.runtime_import, DEFAULT_RUNTIME_IMPORT);
        assert_eq!(options.self_package, None);
    }

    #[test]
    fn test_header_and_package_clause() {
        let package = store_package();
        let out = generator(&package).render();
        assert!(out.starts_with(
            "// Automatically generated by MockGen. DO NOT EDIT!\n\
             // Source: store.toml\n\
             \n\
             package store_test\n"
        ));
    }

    #[test]
    fn test_import_block_sorted_by_path() {
        let package = store_package();
        let out = generator(&package).render();
        assert!(out.contains(
            "import (\n\
             \tcontext \"context\"\n\
             \tstore \"github.com/acme/store\"\n\
             \tpegomock \"github.com/petergtz/pegomock\"\n\
             )\n"
        ));
    }

    #[test]
    fn test_self_package_skipped_and_unqualified() {
        let package = store_package();
        let options = GenerateOptions::for_package(&package)
            .with_package_out("store")
            .with_self_package("github.com/acme/store");
        let out = Generator::new(&package, Source::File("store.toml".into()), options).render();
        assert!(!out.contains("\"github.com/acme/store\""));
        assert!(out.contains("func (mock *MockStore) Get(ctx context.Context) (*Item, error) {"));
    }

    #[test]
    fn test_dot_imports_emitted_last() {
        let mut package = store_package();
        package.dot_imports.push("github.com/onsi/gomega".to_string());
        let out = generator(&package).render();
        assert!(out.contains(
            "\tpegomock \"github.com/petergtz/pegomock\"\n\
             \t. \"github.com/onsi/gomega\"\n\
             )\n"
        ));
    }

    #[test]
    fn test_runtime_alias_tracks_collisions() {
        let mut package = store_package();
        package.interfaces[0] = Interface::new("Store").method(
            Method::new("Match").param(Parameter::new("m", Type::qualified("example.com/pegomock", "M"))),
        );
        let out = generator(&package).render();
        assert!(out.contains("\tpegomock \"example.com/pegomock\"\n"));
        assert!(out.contains("\tpegomock0 \"github.com/petergtz/pegomock\"\n"));
        assert!(out.contains("pegomock0.GetGenericMockFrom(mock).Invoke(\"Match\", m)"));
    }

    #[test]
    fn test_interfaces_in_declaration_order() {
        let mut package = store_package();
        package.interfaces.push(Interface::new("Cache"));
        let out = generator(&package).render();
        let store = out.find("type MockStore struct").unwrap();
        let verifier = out.find("type VerifierStore struct").unwrap();
        let cache = out.find("type MockCache struct").unwrap();
        assert!(store < verifier && verifier < cache);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let package = store_package();
        let first = generator(&package).generate(&Canonical).unwrap();
        let second = generator(&package).generate(&Canonical).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_formats_output() {
        let package = store_package();
        let out = String::from_utf8(generator(&package).generate(&Canonical).unwrap()).unwrap();
        assert!(out.contains("\tmock                   *MockStore\n"));
        assert!(!out.contains("\n\n\n"));
        assert!(out.ends_with("}\n"));
    }

    struct Rejecting;

    impl SourceFormatter for Rejecting {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        fn format(&self, src: &str) -> Result<String, FormatError> {
            Err(FormatError::Malformed {
                line: 1,
                message: "rejected".to_string(),
                source_text: src.to_string(),
            })
        }
    }

    #[test]
    fn test_formatter_failure_yields_no_output() {
        let package = store_package();
        let err = generator(&package).generate(&Rejecting).unwrap_err();
        let raw = err.source_text().unwrap();
        assert!(raw.contains("type MockStore struct"));
    }
}
