//! Collision-free package aliases for generated imports.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use mockgen_core::path_base;
use mockgen_model::PackageAliases;

use crate::naming::{GO_NAMING, NamingConvention};

/// Mapping from import path to the local alias used in generated code.
///
/// Paths are resolved in lexicographic order, so the same set of paths
/// always yields the same aliases no matter how it was collected.
///
/// # Example
///
/// ```
/// use mockgen_codegen::AliasMap;
///
/// let aliases = AliasMap::resolve(["text/template", "html/template"]);
/// assert_eq!(aliases.get("html/template"), Some("template"));
/// assert_eq!(aliases.get("text/template"), Some("template0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    aliases: BTreeMap<String, String>,
}

impl AliasMap {
    /// Resolve aliases for `paths` using Go naming rules.
    pub fn resolve<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::resolve_with(paths, &GO_NAMING)
    }

    /// Resolve aliases for `paths` with a custom naming convention.
    pub fn resolve_with<I, S>(paths: I, naming: &NamingConvention) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = paths
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        let mut taken = HashSet::new();
        let mut aliases = BTreeMap::new();
        for path in sorted {
            let base = naming.sanitize(path_base(&path));
            let alias = unique_alias(base, &taken, naming);
            tracing::debug!(path = %path, alias = %alias, "resolved import alias");
            taken.insert(alias.clone());
            aliases.insert(path, alias);
        }

        Self { aliases }
    }

    /// Get the alias assigned to an import path.
    pub fn get(&self, import_path: &str) -> Option<&str> {
        self.aliases.get(import_path).map(String::as_str)
    }

    /// Check if an alias is already assigned to some path.
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.aliases.values().any(|a| a == alias)
    }

    /// Iterate over `(path, alias)` pairs sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl PackageAliases for AliasMap {
    fn alias_for<'a>(&'a self, import_path: &'a str) -> Option<&'a str> {
        self.get(import_path)
    }
}

fn unique_alias(base: String, taken: &HashSet<String>, naming: &NamingConvention) -> String {
    if !taken.contains(&base) && !naming.is_reserved(&base) {
        return base;
    }

    let mut suffix = 0usize;
    loop {
        let candidate = format!("{}{}", base, suffix);
        if !taken.contains(&candidate) && !naming.is_reserved(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
