//! Customer repository for database operations
//!
//! The only code in this service allowed to touch SQL. Every method opens
//! its own connection and drops it at the end of the call.

use common::database;
use common::error::{StorageError, StorageResult};
use sqlx::Row;
use sqlx::sqlite::SqliteConnectOptions;
use tracing::info;

use crate::models::{Customer, NewCustomer};

/// Customer repository
#[derive(Clone)]
pub struct CustomerRepository {
    options: SqliteConnectOptions,
}

impl CustomerRepository {
    /// Create a new customer repository
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    /// Create the `clientes` table if it does not exist yet
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        let mut conn = database::connect(&self.options).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clientes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                email TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut conn)
        .await
        .map_err(StorageError::Query)?;

        Ok(())
    }

    /// Insert a new customer and return it with its assigned id
    pub async fn insert(&self, new_customer: &NewCustomer) -> StorageResult<Customer> {
        info!("Inserting customer: {}", new_customer.name);

        let mut conn = database::connect(&self.options).await?;

        let row = sqlx::query(
            r#"
            INSERT INTO clientes (nome, email)
            VALUES (?1, ?2)
            RETURNING id, nome, email
            "#,
        )
        .bind(&new_customer.name)
        .bind(&new_customer.email)
        .fetch_one(&mut conn)
        .await
        .map_err(StorageError::from_query)?;

        Ok(Customer {
            id: row.get("id"),
            name: row.get("nome"),
            email: row.get("email"),
        })
    }

    /// Fetch all customers in insertion order
    pub async fn list_all(&self) -> StorageResult<Vec<Customer>> {
        let mut conn = database::connect(&self.options).await?;

        let rows = sqlx::query("SELECT id, nome, email FROM clientes")
            .fetch_all(&mut conn)
            .await
            .map_err(StorageError::Query)?;

        let customers = rows
            .into_iter()
            .map(|row| Customer {
                id: row.get("id"),
                name: row.get("nome"),
                email: row.get("email"),
            })
            .collect();

        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::DatabaseConfig;

    fn temp_repository(dir: &tempfile::TempDir) -> CustomerRepository {
        let path = dir.path().join("clientes.db");
        let config = DatabaseConfig {
            database_path: path.to_string_lossy().into_owned(),
        };
        CustomerRepository::new(config.connect_options())
    }

    #[tokio::test]
    async fn insert_then_list_returns_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        repo.ensure_schema().await.unwrap();

        let created = repo
            .insert(&NewCustomer {
                name: "Anderson".to_string(),
                email: "anderson@email.com".to_string(),
            })
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].name, "Anderson");
        assert_eq!(all[0].email, "anderson@email.com");
    }

    #[tokio::test]
    async fn ids_are_assigned_and_increasing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        repo.ensure_schema().await.unwrap();

        let first = repo
            .insert(&NewCustomer {
                name: "Maria".to_string(),
                email: "maria@email.com".to_string(),
            })
            .await
            .unwrap();
        let second = repo
            .insert(&NewCustomer {
                name: "Maria".to_string(),
                email: "maria@email.com".to_string(),
            })
            .await
            .unwrap();

        // Duplicate emails are allowed here on purpose; only the ids differ
        assert!(second.id > first.id);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);

        repo.ensure_schema().await.unwrap();
        repo.insert(&NewCustomer {
            name: "Ana".to_string(),
            email: "ana@email.com".to_string(),
        })
        .await
        .unwrap();

        // A second call must not wipe existing rows
        repo.ensure_schema().await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
