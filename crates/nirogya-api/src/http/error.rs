//! Application error type mapping to HTTP status codes.
//!
//! Error responses carry a flat body: `{"error": "<message>"}`. Analysis
//! validation failures map to 400, processing failures to 500 with the
//! human-readable message; chat passes upstream status codes through.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use nirogya_types::error::{AnalysisError, RepositoryError, StorageError};
use nirogya_types::llm::CompletionError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Report analysis errors.
    Analysis(AnalysisError),
    /// Chat completion errors (upstream status passed through).
    Chat(CompletionError),
    /// Repository errors from direct handler queries.
    Repository(RepositoryError),
    /// Object store errors from the upload flow.
    Storage(StorageError),
    /// Request validation error.
    Validation(String),
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        AppError::Analysis(e)
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        AppError::Chat(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Analysis(e @ AnalysisError::InvalidRequest) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Analysis(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Chat(e @ CompletionError::Upstream { status, .. }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                e.to_string(),
            ),
            AppError::Chat(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Repository(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            AppError::Repository(e) => {
                tracing::error!(error = %e, "repository error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!(error = %e, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
