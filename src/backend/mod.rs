//! Backend Module
//!
//! This module contains all server-side code for the Tangerine platform.
//! It provides an Axum HTTP server with credential authentication, stateless
//! session tokens and role-based guarding of pages and APIs.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - Registration, login, logout and current-user handlers
//! - The authorization guard and its page/API dispatch adapters
//! - Practitioner blog post creation
//! - Persistence (PostgreSQL, or in-memory when no database is configured)
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly
//! - **`auth`** - Users, password hashing, session tokens, credential verification
//! - **`middleware`** - Token extraction, guard, page and API adapters
//! - **`pages`** - Server-side page data for dashboards
//! - **`blog`** - Blog post storage and the create handler
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Guard and dispatch adapters
//! ├── pages/          - Page data loaders
//! ├── blog/           - Blog posts
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the user and blog stores, the password hasher and the
//! session token service. Everything in it is behind `Arc` and cheap to clone;
//! the only mutable data lives in the stores.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. `BackendError` implements
//! `IntoResponse` and renders `{"error": ..., "status": ...}` bodies.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Token extraction, authorization guard and dispatch adapters
pub mod middleware;

/// Guarded page data
pub mod pages;

/// Practitioner blog posts
pub mod blog;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
