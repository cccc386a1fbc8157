//! Error handling module for the reward chart.
//!
//! Provides centralized error types with mapping to process exit codes and the JSON output envelope.

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNSUPPORTED: &str = "UNSUPPORTED";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
    pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
}

/// Exit code for errors caused by the user's input.
pub const EXIT_USER_ERROR: i32 = 1;
/// Exit code for failures reading or writing files.
pub const EXIT_STORAGE_ERROR: i32 = 2;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Input rejected by a chart invariant
    Validation(String),
    /// Operation belongs to the other chart mode
    Unsupported(String),
    /// Bad configuration value
    Config(String),
    /// Filesystem error
    Io(String),
    /// JSON encoding error
    Serialization(String),
    /// CSV/JSON export failure
    Export(String),
}

impl AppError {
    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_)
            | AppError::Unsupported(_)
            | AppError::Config(_) => EXIT_USER_ERROR,
            AppError::Io(_) | AppError::Serialization(_) | AppError::Export(_) => {
                EXIT_STORAGE_ERROR
            }
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Unsupported(_) => codes::UNSUPPORTED,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Io(_) => codes::IO_ERROR,
            AppError::Serialization(_) => codes::SERIALIZATION_ERROR,
            AppError::Export(_) => codes::EXPORT_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Unsupported(msg)
            | AppError::Config(msg)
            | AppError::Io(msg)
            | AppError::Serialization(msg)
            | AppError::Export(msg) => msg,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Io(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        tracing::error!("CSV error: {:?}", err);
        AppError::Export(format!("CSV error: {}", err))
    }
}

/// Error details in the output envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error output envelope printed with `--json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message().to_string(),
            },
        }
    }
}
