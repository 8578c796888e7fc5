//! Error handling module for the site server.
//!
//! Provides the application error taxonomy with mapping to HTTP status codes and
//! the JSON error envelope. HTML routes never surface these as faults; page
//! controllers turn them into page state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::content::ContentError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const SUBMISSION_FAILED: &str = "SUBMISSION_FAILED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// Authentication required
    #[error("UNAUTHORIZED: {0}")]
    Unauthorized(String),
    /// Empty result; rendered as an empty state, never as a banner
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    /// Client-side validation failed; no backend call was made
    #[error("VALIDATION_ERROR: {0}")]
    Validation(String),
    /// Network, auth or server failure talking to the content backend
    #[error("BACKEND_ERROR: {0}")]
    BackendFailure(String),
    /// A write call failed or returned an unexpected shape
    #[error("SUBMISSION_FAILED: {0}")]
    SubmissionFailure(String),
    /// Internal server error
    #[error("INTERNAL_ERROR: {0}")]
    Internal(String),
    /// Bad request
    #[error("BAD_REQUEST: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BackendFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::SubmissionFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::BackendFailure(_) => codes::BACKEND_ERROR,
            AppError::SubmissionFailure(_) => codes::SUBMISSION_FAILED,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BackendFailure(msg)
            | AppError::SubmissionFailure(msg)
            | AppError::Internal(msg)
            | AppError::BadRequest(msg) => msg.clone(),
        }
    }

    /// Reclassify a backend failure that happened during a write.
    pub fn into_submission_failure(self) -> Self {
        match self {
            AppError::BackendFailure(msg) | AppError::NotFound(msg) => {
                AppError::SubmissionFailure(msg)
            }
            other => other,
        }
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound => AppError::NotFound("No objects found".to_string()),
            other => {
                tracing::error!("Content backend error: {}", other);
                AppError::BackendFailure(other.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
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
                message: error.message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
