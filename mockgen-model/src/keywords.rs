//! Go keywords and identifier rules.

/// Go keywords, which can never be used as identifiers.
/// Source: https://go.dev/ref/spec#Keywords
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Names declared by generated method bodies.
///
/// A parameter with one of these names would collide with the receiver or
/// a local. Synthesized `_paramN` names are checked separately.
pub const GENERATED_LOCALS: &[&str] = &["mock", "verifier", "result", "_params", "_param"];

/// Check if a parameter name collides with a name generated code declares.
pub fn is_generated_local(name: &str) -> bool {
    if GENERATED_LOCALS.contains(&name) {
        return true;
    }
    name.strip_prefix("_param")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Check if a name is a Go keyword
pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Validate that a name is a Go identifier.
///
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, digits, and underscores");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(GO_KEYWORDS.len(), 25);
        assert!(is_go_keyword("func"));
        assert!(is_go_keyword("range"));
        assert!(!is_go_keyword("string"));
        assert!(!is_go_keyword("template"));
    }

    #[test]
    fn test_generated_locals() {
        assert!(is_generated_local("mock"));
        assert!(is_generated_local("result"));
        assert!(is_generated_local("_params"));
        assert!(is_generated_local("_param3"));
        assert!(!is_generated_local("_paramX"));
        assert!(!is_generated_local("results"));
        assert!(!is_generated_local("_"));
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("Get").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("v2").is_none());
        assert!(validate_identifier("größe").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(validate_identifier(""), Some("name cannot be empty"));
        assert_eq!(
            validate_identifier("2fast"),
            Some("name must start with a letter or underscore")
        );
        assert_eq!(
            validate_identifier("get-user"),
            Some("name must contain only letters, digits, and underscores")
        );
    }
}
