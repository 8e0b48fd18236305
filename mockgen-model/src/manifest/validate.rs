//! Validation context and utilities for model file parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext, is_generated_local, is_go_keyword, validate_identifier};

/// Parsing and validation context that carries source information.
///
/// Holds the source content and the current path through the model
/// (e.g. `Store.Get`) so nested validation can produce precise messages.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "parameter in 'Store.Get'" or just "interface" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a quoted value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value)
    }

    /// Validate that a name is a usable Go identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_go_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Validate a method input name against the names generated code declares.
    pub fn validate_input_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_generated_local(name) {
            return Err(self.source.validation_error(
                format!(
                    "name '{}' of {} is reserved by the generated mock",
                    name,
                    self.context_for(kind)
                ),
                self.find_span(name),
            ));
        }
        Ok(())
    }
}

/// Find the span of a string value in the TOML source.
///
/// Looks for the value in double or single quotes and returns the span of
/// the text between the quotes. The first occurrence wins.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    if value.is_empty() {
        return None;
    }
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}
