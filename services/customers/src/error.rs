//! Custom error types for the customers service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the customers service
#[derive(Error, Debug)]
pub enum CustomerError {
    /// A required form field was empty
    #[error("validation failed: {0}")]
    Validation(String),

    /// Storage failure, fatal to the request
    #[error("storage error: {0}")]
    Storage(#[from] common::error::StorageError),
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            CustomerError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            CustomerError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
