/**
 * Server Initialization
 *
 * This module builds the Axum application from a `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the database if `DATABASE_URL` is configured, and run migrations
 * 2. Build `AppState` (PostgreSQL or in-memory stores, token service, hasher)
 * 3. Create and configure the router
 *
 * A configured database that cannot be reached or migrated aborts startup.
 * Without `DATABASE_URL` the server runs on in-memory stores.
 */

use axum::Router;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create and configure the Axum application
///
/// # Errors
///
/// * `StartupError::Database` / `StartupError::Migration` - the configured
///   database is unusable
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing Tangerine backend server");

    let pool = load_database(config).await?;
    let app_state = AppState::new(config, pool);

    tracing::info!(
        "Session tokens valid for {} days, bcrypt cost {}, {} hash workers",
        config.token_ttl.num_days(),
        config.bcrypt_cost,
        config.hash_workers
    );

    Ok(create_router(app_state))
}

/// Build the application around an existing state
///
/// Used by tests and embedders that assemble their own stores.
pub fn create_app_with_state(app_state: AppState) -> Router<()> {
    create_router(app_state)
}
