//! CLI output: error mapping and exit codes.

use crate::error::{ApiError, MergeError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Merge(MergeError::NotFound { path }) => {
            format!("Error: {} does not exist", path.display())
        }
        other => format!("Error: {}", other),
    }
}

/// Rendered command output and the process exit code it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(text: String) -> Self {
        Self { text, exit_code: 0 }
    }
}
