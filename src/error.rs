//! Error types for metadata merging.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, merging or persisting one metadata document pair.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Metadata document not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed metadata document {}: {message}", .path.display())]
    MalformedDocument { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    /// Short stable label used in summaries and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            MergeError::NotFound { .. } => "not_found",
            MergeError::MalformedDocument { .. } => "malformed_document",
            MergeError::Io { .. } => "io",
            MergeError::WriteFailure { .. } => "write_failure",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MergeError::NotFound { .. })
    }
}

/// Top-level errors for the library surface and CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}
