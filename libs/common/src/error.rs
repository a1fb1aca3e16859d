//! Storage error taxonomy shared by the service repositories

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors surfaced by the storage accessors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while opening a database connection
    #[error("storage connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during query execution
    #[error("storage query error: {0}")]
    Query(#[source] SqlxError),

    /// A uniqueness constraint rejected the write
    #[error("uniqueness constraint violated: {0}")]
    ConstraintViolation(String),

    /// Configuration error
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Classify a query failure, pulling unique-constraint violations
    /// out into their own variant so callers can recover from them.
    pub fn from_query(err: SqlxError) -> Self {
        match &err {
            SqlxError::Database(db) if db.is_unique_violation() => {
                StorageError::ConstraintViolation(db.message().to_string())
            }
            _ => StorageError::Query(err),
        }
    }
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
