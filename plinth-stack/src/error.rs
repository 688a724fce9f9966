use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use plinth_core::TemplateError;
use thiserror::Error;

/// Result type for plinth-stack operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "stack.toml");
/// ctx.validation_error("stack name cannot be empty");
/// ctx.invalid_id_error("9lives", "id must start with a letter", span);
/// ```
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

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
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

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error_at(
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

    /// Create an invalid logical id error.
    pub fn invalid_id_error(
        &self,
        id: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidLogicalId {
            src: self.named_source(),
            span,
            id: id.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate logical id error pointing at both declarations.
    pub fn duplicate_id_error(
        &self,
        id: impl Into<String>,
        first_span: SourceSpan,
        second_span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::DuplicateId {
            src: self.named_source(),
            first_span,
            second_span,
            id: id.into(),
        })
    }

    /// Create a malformed template error.
    pub fn template_error(
        &self,
        resource: impl Into<String>,
        property: impl Into<String>,
        source: TemplateError,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::MalformedTemplate {
            src: self.named_source(),
            span,
            resource: resource.into(),
            property: property.into(),
            message: source.to_string(),
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'plinth init' to create a starter stack"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stack file")]
    #[diagnostic(code(plinth::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(plinth::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid logical id '{id}'")]
    #[diagnostic(
        code(plinth::invalid_id),
        help(
            "{reason}. Use only letters, numbers, underscores, and dashes, starting with a letter."
        )
    )]
    InvalidLogicalId {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid logical id")]
        span: Option<SourceSpan>,
        id: String,
        reason: String,
    },

    #[error("duplicate logical id '{id}'")]
    #[diagnostic(
        code(plinth::duplicate_id),
        help("logical ids must be unique across the stack, rename one of the resources")
    )]
    DuplicateId {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        id: String,
    },

    #[error("malformed reference in '{resource}.{property}'")]
    #[diagnostic(
        code(plinth::malformed_reference),
        help("references are written as '${{resource.attribute}}', use '$${{' for a literal '${{'")
    )]
    MalformedTemplate {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        resource: String,
        property: String,
        message: String,
        #[source]
        source: TemplateError,
    },
}
