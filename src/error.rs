//! Error types for files-manager.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for files-manager.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Database error.
    ///
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing, malformed or unresolvable credential or token.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown identifier, or one hidden for ownership/visibility reasons.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Content storage root unavailable.
    #[error("storage error: {0}")]
    Storage(String),

    /// Password hashing error.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Background job failure.
    #[error("job error: {0}")]
    Job(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FilesError {
    /// The generic unauthorized error returned for every credential failure.
    pub fn unauthorized() -> Self {
        FilesError::Auth("Unauthorized".to_string())
    }

    /// The generic not-found error that hides whether a record exists.
    pub fn not_found() -> Self {
        FilesError::NotFound("Not found".to_string())
    }
}

impl From<sqlx::Error> for FilesError {
    fn from(e: sqlx::Error) -> Self {
        FilesError::Database(e.to_string())
    }
}

/// Result type alias for files-manager operations.
pub type Result<T> = std::result::Result<T, FilesError>;
