//! Error types for the tc-app service layer.

use std::path::PathBuf;
use tc_comfort::ComfortError;

/// Application error type shared by the CLI and library callers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid {column} input: {message}")]
    InvalidInput {
        column: &'static str,
        message: String,
    },

    #[error("Input lists are not aligned: {0}")]
    Alignment(String),

    #[error("Failed to read job file: {path}")]
    JobFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write job file: {path}")]
    JobFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Job error: {0}")]
    Job(String),

    #[error("Job validation failed: {0}")]
    Validation(String),

    #[error("Unsupported job file format: {0}")]
    UnsupportedFormat(String),

    #[error("Comfort evaluation failed: {0}")]
    Comfort(#[from] ComfortError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Job(format!("YAML: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Job(format!("JSON: {err}"))
    }
}
