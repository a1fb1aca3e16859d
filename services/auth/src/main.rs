use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

mod error;
mod models;
mod password;
mod repositories;
mod routes;
mod session;
mod validation;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use common::database;

use crate::repositories::UserRepository;

const DEFAULT_DATABASE_PATH: &str = "usuarios.db";
const BIND_ADDR: &str = "0.0.0.0:3000";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}

/// Signing key for the session cookie
///
/// Derived from `SECRET_KEY` when one of at least 32 bytes is set;
/// otherwise an ephemeral key is generated and existing sessions die
/// with the process.
fn cookie_key() -> Key {
    match std::env::var("SECRET_KEY") {
        Ok(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Ok(_) => {
            warn!("SECRET_KEY is shorter than 32 bytes, using an ephemeral key");
            Key::generate()
        }
        Err(_) => {
            warn!("SECRET_KEY not set, using an ephemeral key");
            Key::generate()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting authentication service");

    let db_config = database::DatabaseConfig::from_env(DEFAULT_DATABASE_PATH)?;
    let options = db_config.connect_options();

    // Check database connectivity
    if database::health_check(&options).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let user_repository = UserRepository::new(options);

    // Create the table at startup; a no-op when it already exists
    user_repository.ensure_schema().await?;
    info!("Authentication service initialized successfully");

    let app_state = AppState {
        user_repository,
        cookie_key: cookie_key(),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    info!("Authentication service listening on {}", BIND_ADDR);

    axum::serve(listener, app).await?;

    Ok(())
}
