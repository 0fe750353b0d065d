//! Error types module
//!
//! Every stage of the ingestion pipeline (validate, decode, upload, persist)
//! reports failures through `AppError`. The variant decides the HTTP status,
//! the machine-readable code and the log level via [`ErrorMetadata`].
//!
//! The `Persistence` variant carries the underlying `sqlx::Error` when the
//! `sqlx` feature is enabled (the default), and a plain message otherwise.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for caller-side problems worth noticing
    Warn,
    /// Error level - for failures of a collaborator
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_ERROR")
    fn error_code(&self) -> &'static str;

    /// Human-readable detail surfaced to the caller
    fn detail(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body does not match the submission shape.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// An image item's value is not valid base64.
    #[error("Error decoding image data: {0}")]
    Decode(String),

    /// The object store rejected the write, was unreachable or timed out.
    #[error("Error uploading image: {0}")]
    Upload(String),

    #[cfg(feature = "sqlx")]
    #[error("Error inserting record: {0}")]
    Persistence(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Error inserting record: {0}")]
    Persistence(String),

    /// A stored object's public URL could not be resolved.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Persistence(err)
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::Validation(_) => (400, "VALIDATION_ERROR", LogLevel::Debug),
        AppError::Decode(_) => (400, "DECODE_ERROR", LogLevel::Warn),
        AppError::Upload(_) => (500, "UPLOAD_ERROR", LogLevel::Error),
        AppError::Persistence(_) => (500, "PERSISTENCE_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::Decode(_) => "DecodeError",
            AppError::Upload(_) => "UploadError",
            AppError::Persistence(_) => "PersistenceError",
            AppError::Internal(_) => "InternalError",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn detail(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
