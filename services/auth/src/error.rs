//! Custom error types for the authentication service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for authentication flows
///
/// The recoverable variants are turned into notice redirects by the
/// handlers; whatever reaches `IntoResponse` directly renders as a JSON
/// error body.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required form field was empty
    #[error("validation failed: {0}")]
    Validation(String),

    /// The email is already registered
    #[error("email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password; never say which
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Storage failure, fatal to the request
    #[error("storage error: {0}")]
    Storage(#[from] common::error::StorageError),

    /// Internal failure (hashing, session encoding)
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AuthError::DuplicateEmail => (
                StatusCode::CONFLICT,
                "Email already registered".to_string(),
            ),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AuthError::Storage(_) | AuthError::Internal(_) => (
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
