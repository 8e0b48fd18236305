use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for model operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the model file content and filename so that error factories
/// don't need them passed around individually.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, optionally pointing at a span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create a reserved keyword error.
    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create a type expression error.
    pub fn type_error(
        &self,
        expr: impl Into<String>,
        context: impl Into<String>,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span,
            expr: expr.into(),
            context: context.into(),
            message: message.into(),
        })
    }

    /// Create an unsupported embedded interface error.
    pub fn embedded_interface_error(
        &self,
        interface: impl Into<String>,
        embedded: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::EmbeddedInterface {
            src: self.named_source(),
            span,
            interface: interface.into(),
            embedded: embedded.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(mockgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model file")]
    #[diagnostic(code(mockgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(mockgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a Go keyword")]
    #[diagnostic(
        code(mockgen::reserved_keyword),
        help("Go does not allow keywords as {context} names")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(mockgen::invalid_identifier),
        help(
            "{reason}. Use only letters, digits, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("invalid type '{expr}' for {context}")]
    #[diagnostic(code(mockgen::invalid_type), help("{message}"))]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        expr: String,
        context: String,
        message: String,
    },

    #[error("interface '{interface}' embeds '{embedded}'")]
    #[diagnostic(
        code(mockgen::embedded_interface),
        help("embedded interfaces are not supported; declare the embedded methods directly")
    )]
    EmbeddedInterface {
        #[source_code]
        src: NamedSource<String>,
        #[label("embedded here")]
        span: Option<SourceSpan>,
        interface: String,
        embedded: String,
    },

    #[error("interface '{name}' is not declared in the model")]
    #[diagnostic(code(mockgen::unknown_interface), help("available interfaces: {available}"))]
    UnknownInterface { name: String, available: String },
}
