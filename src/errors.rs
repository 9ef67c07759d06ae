//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Every variant
//! renders as a response envelope, so no failure path leaves without
//! producing exactly one `ApiResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::config::RuntimeMode;
use crate::infra::{StorageClassifier, StorageError};
use crate::types::{ApiResponse, ErrorDetail};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Per-field validation failures, surfaced as a list.
    #[error("Validation failed")]
    Validation(Vec<ErrorDetail>),

    /// Content-type, empty-body, or decode failures.
    #[error("{0}")]
    Malformed(String),

    /// Business-rule rejection raised by domain logic.
    #[error("{0}")]
    BadRequest(String),

    /// Resource absent. Normal control flow, not a fault.
    #[error("{0}")]
    NotFound(String),

    /// Storage fault, routed through the classifier when rendered.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Anything not anticipated elsewhere.
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Malformed(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // The classifier refines this when the response is rendered.
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                let body = ApiResponse::validation_error("Validation failed", errors);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::Malformed(message) | AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ApiResponse::error(message))).into_response()
            }
            AppError::Storage(fault) => {
                tracing::error!("Storage fault: {}", fault.detail());
                let classifier = StorageClassifier::new(RuntimeMode::current());
                let (status, body) = classifier.classify(&fault);
                (status, Json(body)).into_response()
            }
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                let body = if RuntimeMode::current().is_development() {
                    ApiResponse::error_with_details(
                        "An internal error occurred",
                        vec![ErrorDetail::general(message)],
                    )
                } else {
                    ApiResponse::error("An internal error occurred")
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    /// Not-found error for a named resource, e.g. `not_found("User")`.
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(format!("{} not found", resource.into()))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
