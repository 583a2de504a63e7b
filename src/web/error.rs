//! API error handling for the files-manager HTTP API.
//!
//! Every failure is returned as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::FilesError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400): validation failures and duplicates.
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Not found (404), also used for entries the caller may not see.
    NotFound,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized, "Unauthorized")
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<FilesError> for ApiError {
    fn from(err: FilesError) -> Self {
        match err {
            FilesError::Auth(_) => ApiError::unauthorized(),
            FilesError::Validation(msg) | FilesError::Conflict(msg) => ApiError::bad_request(msg),
            FilesError::NotFound(msg) => ApiError::not_found(msg),
            FilesError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                ApiError::internal(msg)
            }
            err => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_files_error() {
        let err: ApiError = FilesError::unauthorized().into();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Unauthorized");

        let err: ApiError = FilesError::Validation("Missing name".to_string()).into();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Missing name");

        let err: ApiError = FilesError::Conflict("Already exist".to_string()).into();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err: ApiError = FilesError::not_found().into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Not found");

        let err: ApiError = FilesError::Storage("Unable to locate folder".to_string()).into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Unable to locate folder");
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let err: ApiError = FilesError::Database("disk I/O error at /secret".to_string()).into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ErrorBody {
            error: "Not found".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"error": "Not found"}));
    }
}
