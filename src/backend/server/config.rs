/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables (a
 * `.env` file is read by the binary before this runs) and opens the optional
 * PostgreSQL database.
 *
 * # Configuration Sources
 *
 * | Variable             | Default              | Meaning                              |
 * |----------------------|----------------------|--------------------------------------|
 * | `JWT_SECRET`         | required             | Session token signing secret         |
 * | `DATABASE_URL`       | unset → in-memory    | PostgreSQL connection string         |
 * | `SERVER_PORT`        | 3000                 | HTTP listen port                     |
 * | `TOKEN_TTL_DAYS`     | 30                   | Session token lifetime               |
 * | `BCRYPT_COST`        | 10                   | bcrypt cost factor                   |
 * | `HASH_WORKERS`       | available parallelism| Concurrent hash/verify jobs          |
 * | `HASH_TIMEOUT_SECS`  | 10                   | Limit for one hash/verify job        |
 * | `STORE_TIMEOUT_SECS` | 5                    | Limit for one store call             |
 *
 * # Error Handling
 *
 * A missing `JWT_SECRET` or an unparseable value is a `ConfigError` and the
 * server refuses to start. There is no fallback secret.
 */

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::backend::auth::password::DEFAULT_COST;
use crate::backend::auth::sessions::DEFAULT_TTL_DAYS;
use crate::backend::server::init::StartupError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_HASH_TIMEOUT_SECS: u64 = 10;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub jwt_secret: String,
    pub database_url: Option<String>,
    pub port: u16,
    pub token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub hash_workers: usize,
    pub hash_timeout: Duration,
    pub store_timeout: Duration,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut builder = Self::builder();

        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = parse::<u16, _>(&get, "SERVER_PORT")? {
            builder = builder.port(port);
        }
        if let Some(days) = parse::<i64, _>(&get, "TOKEN_TTL_DAYS")? {
            if days <= 0 {
                return Err(invalid("TOKEN_TTL_DAYS", days));
            }
            builder = builder.token_ttl(chrono::Duration::days(days));
        }
        if let Some(cost) = parse::<u32, _>(&get, "BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(workers) = parse::<usize, _>(&get, "HASH_WORKERS")? {
            builder = builder.hash_workers(workers);
        }
        if let Some(secs) = parse::<u64, _>(&get, "HASH_TIMEOUT_SECS")? {
            builder = builder.hash_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = parse::<u64, _>(&get, "STORE_TIMEOUT_SECS")? {
            builder = builder.store_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(invalid("BCRYPT_COST", self.bcrypt_cost));
        }
        if self.hash_workers == 0 {
            return Err(invalid("HASH_WORKERS", self.hash_workers));
        }
        if self.token_ttl <= chrono::Duration::zero() {
            return Err(invalid("TOKEN_TTL_DAYS", self.token_ttl.num_days()));
        }
        Ok(())
    }
}

fn parse<T, G>(get: &G, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| raw.parse::<T>().map_err(|_| ConfigError::InvalidValue { key, value: raw }))
        .transpose()
}

fn invalid(key: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    jwt_secret: Option<String>,
    database_url: Option<String>,
    port: Option<u16>,
    token_ttl: Option<chrono::Duration>,
    bcrypt_cost: Option<u32>,
    hash_workers: Option<usize>,
    hash_timeout: Option<Duration>,
    store_timeout: Option<Duration>,
}

impl ServerConfigBuilder {
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn token_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn hash_workers(mut self, workers: usize) -> Self {
        self.hash_workers = Some(workers);
        self
    }

    pub fn hash_timeout(mut self, timeout: Duration) -> Self {
        self.hash_timeout = Some(timeout);
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingValue("JWT_SECRET")` - no signing secret was given
    /// * `ConfigError::InvalidValue` - a value is out of range
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let config = ServerConfig {
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            database_url: self.database_url,
            port: self.port.unwrap_or(DEFAULT_PORT),
            token_ttl: self.token_ttl.unwrap_or_else(|| chrono::Duration::days(DEFAULT_TTL_DAYS)),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_COST),
            hash_workers: self.hash_workers.unwrap_or_else(default_workers),
            hash_timeout: self
                .hash_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_HASH_TIMEOUT_SECS)),
            store_timeout: self
                .store_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS)),
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Open the database and run migrations
///
/// Returns `None` when `DATABASE_URL` is not configured; the caller then falls
/// back to in-memory stores. A configured database that cannot be reached or
/// migrated is a startup error.
pub async fn load_database(config: &ServerConfig) -> Result<Option<PgPool>, StartupError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!(
            "DATABASE_URL not set. Using in-memory stores, data will not survive a restart."
        );
        return Ok(None);
    };

    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(config.store_timeout)
        .connect(database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {}", e);
            StartupError::Database(e)
        })?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        StartupError::Migration(e)
    })?;
    tracing::info!("Database ready");

    Ok(Some(pool))
}
