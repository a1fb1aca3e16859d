use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod models;
mod repositories;
mod routes;

use common::database;

use crate::repositories::CustomerRepository;

const DEFAULT_DATABASE_PATH: &str = "clientes.db";
const BIND_ADDR: &str = "0.0.0.0:3001";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_repository: CustomerRepository,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting customers service");

    let db_config = database::DatabaseConfig::from_env(DEFAULT_DATABASE_PATH)?;
    let options = db_config.connect_options();

    // Check database connectivity
    if database::health_check(&options).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let customer_repository = CustomerRepository::new(options);

    // Create the table at startup; a no-op when it already exists
    customer_repository.ensure_schema().await?;
    info!("Customers service initialized successfully");

    let app_state = AppState {
        customer_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    info!("Customers service listening on {}", BIND_ADDR);

    axum::serve(listener, app).await?;

    Ok(())
}
