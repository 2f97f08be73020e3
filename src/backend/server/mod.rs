//! Server Module
//!
//! This module contains the server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (environment, database)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env` (missing `JWT_SECRET` is fatal)
//! 2. **Database**: optional PostgreSQL pool plus migrations
//! 3. **State Creation**: stores, token service, hasher, verifier
//! 4. **Router Creation**: configures all routes and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use tangerine::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, create_app_with_state, StartupError};
pub use state::AppState;
