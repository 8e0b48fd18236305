//! Naming conventions for generated Go code.

use mockgen_model::GO_KEYWORDS;

/// Naming rules for generated mocks and import aliases.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Interface name to mock type name (e.g., "Store" -> "MockStore")
    pub mock_type: fn(&str) -> String,
    /// Interface name to verifier type name (e.g., "Store" -> "VerifierStore")
    pub verifier_type: fn(&str) -> String,
    /// Type name to constructor name (e.g., "MockStore" -> "NewMockStore")
    pub constructor: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Alias used when sanitizing leaves nothing usable
    pub fallback_identifier: &'static str,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Turn an import path segment into a usable package identifier.
    ///
    /// The first character must be a letter or underscore and the rest
    /// letters, digits or underscores; anything else becomes `_`. An empty
    /// or all-underscore result is replaced by the fallback identifier.
    pub fn sanitize(&self, segment: &str) -> String {
        let mut out = String::with_capacity(segment.len());
        for c in segment.chars() {
            let allowed = if out.is_empty() {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || c == '_'
            };
            out.push(if allowed { c } else { '_' });
        }

        if out.chars().all(|c| c == '_') {
            return self.fallback_identifier.to_string();
        }
        out
    }

    /// Placeholder name for the unnamed parameter at `index`.
    pub fn synthesized_param(&self, index: usize) -> String {
        format!("_param{}", index)
    }
}

fn mock_type(interface: &str) -> String {
    format!("Mock{}", interface)
}

fn verifier_type(interface: &str) -> String {
    format!("Verifier{}", interface)
}

fn constructor(type_name: &str) -> String {
    format!("New{}", type_name)
}

/// Go naming conventions.
pub const GO_NAMING: NamingConvention = NamingConvention {
    mock_type,
    verifier_type,
    constructor,
    reserved_words: GO_KEYWORDS,
    fallback_identifier: "x",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!((GO_NAMING.mock_type)("Store"), "MockStore");
        assert_eq!((GO_NAMING.verifier_type)("Store"), "VerifierStore");
        assert_eq!((GO_NAMING.constructor)("MockStore"), "NewMockStore");
    }

    #[test]
    fn test_reserved_words() {
        assert!(GO_NAMING.is_reserved("type"));
        assert!(GO_NAMING.is_reserved("case"));
        assert!(!GO_NAMING.is_reserved("template"));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(GO_NAMING.sanitize(""), "x");
        assert_eq!(GO_NAMING.sanitize("_"), "x");
        assert_eq!(GO_NAMING.sanitize("__"), "x");
        assert_eq!(GO_NAMING.sanitize("-"), "x");
        assert_eq!(GO_NAMING.sanitize("."), "x");
        assert_eq!(GO_NAMING.sanitize("foo-bar"), "foo_bar");
        assert_eq!(GO_NAMING.sanitize("123abc"), "_23abc");
        assert_eq!(GO_NAMING.sanitize("go.uuid"), "go_uuid");
        assert_eq!(GO_NAMING.sanitize("v2"), "v2");
        assert_eq!(GO_NAMING.sanitize("_internal"), "_internal");
    }

    #[test]
    fn test_synthesized_param() {
        assert_eq!(GO_NAMING.synthesized_param(0), "_param0");
        assert_eq!(GO_NAMING.synthesized_param(1), "_param1");
    }
}
