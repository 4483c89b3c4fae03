use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "genfile.toml");
/// ctx.validation_error("record path is empty");
/// ctx.unknown_project_error("Core", "Web, Tests", span);
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

    /// Create a validation error with a span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    /// Create an invalid path error for a file name or folder.
    pub fn invalid_path_error(
        &self,
        value: impl Into<String>,
        kind: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPath {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
            kind: kind.into(),
            reason: reason.into(),
        })
    }

    /// Create an unknown project error.
    pub fn unknown_project_error(
        &self,
        project: impl Into<String>,
        known: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownProject {
            src: self.named_source(),
            span: span.into(),
            project: project.into(),
            known: known.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'genfile init' to create a starter genfile.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read template source '{path}'")]
    #[diagnostic(code(genfile::source))]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse genfile.toml")]
    #[diagnostic(code(genfile::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(genfile::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {kind} '{value}'")]
    #[diagnostic(code(genfile::invalid_path), help("{reason}"))]
    InvalidPath {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid {kind}")]
        span: SourceSpan,
        value: String,
        kind: String,
        reason: String,
    },

    #[error("unknown project '{project}'")]
    #[diagnostic(
        code(genfile::unknown_project),
        help("declare it under [projects]; known projects: {known}")
    )]
    UnknownProject {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared in [projects]")]
        span: SourceSpan,
        project: String,
        known: String,
    },

    #[error("failed to parse generation record '{path}'")]
    #[diagnostic(
        code(genfile::record),
        help("delete the record to start over; previously generated files will no longer be cleaned up")
    )]
    Record {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported generation record version {found} in '{path}'")]
    #[diagnostic(code(genfile::record_version), help("this build understands version {expected}"))]
    RecordVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("failed to serialize generation record")]
    RecordSerialize {
        #[source]
        source: toml::ser::Error,
    },
}
