//! User repository for database operations
//!
//! Every method opens its own connection against the single-file store
//! and drops it when the call finishes. Password hashing happens in the
//! credential module before anything reaches this layer.

use common::database;
use common::error::{StorageError, StorageResult};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use tracing::info;

use crate::models::{NewUser, User};

fn decode_user(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("nome"),
        email: row.get("email"),
        password_hash: row.get("senha"),
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    options: SqliteConnectOptions,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    /// Create the `usuarios` table if it does not exist yet
    ///
    /// `UNIQUE` on email is the store-enforced invariant; the handler
    /// layer checks it defensively before inserting as well.
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        let mut conn = database::connect(&self.options).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usuarios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                senha TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut conn)
        .await
        .map_err(StorageError::Query)?;

        Ok(())
    }

    /// Insert a new user and return it with its assigned id
    ///
    /// Fails with `StorageError::ConstraintViolation` when the email is
    /// already registered.
    pub async fn create(&self, new_user: &NewUser) -> StorageResult<User> {
        info!("Creating new user: {}", new_user.email);

        let mut conn = database::connect(&self.options).await?;

        let row = sqlx::query(
            r#"
            INSERT INTO usuarios (nome, email, senha)
            VALUES (?1, ?2, ?3)
            RETURNING id, nome, email, senha
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&mut conn)
        .await
        .map_err(StorageError::from_query)?;

        Ok(decode_user(&row))
    }

    /// Find a user by email
    ///
    /// Absence is `Ok(None)`, never an error.
    pub async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let mut conn = database::connect(&self.options).await?;

        let row = sqlx::query(
            r#"
            SELECT id, nome, email, senha
            FROM usuarios
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut conn)
        .await
        .map_err(StorageError::Query)?;

        Ok(row.as_ref().map(decode_user))
    }
}
