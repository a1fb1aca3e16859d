//! Database module for the single-file SQLite stores
//!
//! Each repository operation opens its own connection and lets it drop
//! when the call finishes. There is no pool: every call is its own
//! atomic unit and the SQLite engine serializes access internally.

use crate::error::{StorageError, StorageResult};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, SqliteConnection};
use std::env;

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub database_path: String,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// Reads `DATABASE_PATH`; falls back to the service-provided default
    /// (the database file is created next to the process, as the original
    /// tutorial apps do).
    pub fn from_env(default_path: &str) -> StorageResult<Self> {
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| default_path.to_string());

        if database_path.is_empty() {
            return Err(StorageError::Configuration(
                "database path must not be empty".to_string(),
            ));
        }

        Ok(Self { database_path })
    }

    /// Connection options for this database file
    ///
    /// `create_if_missing` mirrors SQLite's default open behavior: the
    /// file appears on first use.
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.database_path)
            .create_if_missing(true)
    }
}

/// Open a fresh connection to the database
///
/// # Arguments
///
/// * `options` - SQLite connection options
///
/// # Returns
///
/// * `StorageResult<SqliteConnection>` - open connection or error
pub async fn connect(options: &SqliteConnectOptions) -> StorageResult<SqliteConnection> {
    options.connect().await.map_err(StorageError::Connection)
}

/// Check database connectivity
///
/// # Arguments
///
/// * `options` - SQLite connection options
///
/// # Returns
///
/// * `StorageResult<bool>` - True if the database answers a trivial query
pub async fn health_check(options: &SqliteConnectOptions) -> StorageResult<bool> {
    let mut conn = connect(options).await?;

    sqlx::query("SELECT 1")
        .execute(&mut conn)
        .await
        .map_err(StorageError::Query)?;

    Ok(true)
}
