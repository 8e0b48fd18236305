//! References to the mocking runtime package from generated code.

use crate::AliasMap;

/// Import path of the runtime package used when none is configured.
pub const DEFAULT_RUNTIME_IMPORT: &str = "github.com/petergtz/pegomock";

/// Qualifies runtime symbols with the alias the runtime package received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    qualifier: Option<String>,
}

impl Runtime {
    /// Look up the runtime alias in `aliases`.
    ///
    /// Symbols stay unqualified when the mocks are generated into the
    /// runtime package itself or the path was never resolved.
    pub fn resolve(import_path: &str, aliases: &AliasMap, self_package: Option<&str>) -> Self {
        let qualifier = if self_package == Some(import_path) {
            None
        } else {
            aliases.get(import_path).map(str::to_string)
        };
        Self { qualifier }
    }

    /// A runtime symbol as written in generated code (e.g., `pegomock.Times`).
    pub fn symbol(&self, name: &str) -> String {
        match &self.qualifier {
            Some(alias) => format!("{}.{}", alias, name),
            None => name.to_string(),
        }
    }
}
