//! Error types
//!
//! `TagError` describes why a single workout file (or directory) could not be
//! processed. It never aborts a run; the run collects it into the report.
//! `ApiError` is reserved for failures that stop a command before any file is
//! touched: bad configuration, an unusable root path, logging setup.

use std::path::PathBuf;
use thiserror::Error;

/// Per-file failure collected into a run report
#[derive(Debug, Error)]
pub enum TagError {
    /// A file or directory could not be read
    #[error("cannot access {}: {source}", .path.display())]
    AccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document lacks one of the fields the writer rewrites
    #[error("{}: missing <{field}> element", .path.display())]
    MissingFieldError { path: PathBuf, field: &'static str },

    /// The document is not well-formed, or a target field holds markup
    #[error("{}: {message}", .path.display())]
    ParseError { path: PathBuf, message: String },

    /// The rewritten document could not be persisted
    #[error("cannot write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TagError {
    /// Path the failure refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            TagError::AccessError { path, .. }
            | TagError::MissingFieldError { path, .. }
            | TagError::ParseError { path, .. }
            | TagError::WriteError { path, .. } => path,
        }
    }

    /// Stable machine-readable kind used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            TagError::AccessError { .. } => "access",
            TagError::MissingFieldError { .. } => "missing_field",
            TagError::ParseError { .. } => "parse",
            TagError::WriteError { .. } => "write",
        }
    }

    /// Reason without the path prefix, for tabular output
    pub fn reason(&self) -> String {
        match self {
            TagError::AccessError { source, .. } | TagError::WriteError { source, .. } => {
                source.to_string()
            }
            TagError::MissingFieldError { field, .. } => format!("missing <{}> element", field),
            TagError::ParseError { message, .. } => message.clone(),
        }
    }
}

/// Command-level failure
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
