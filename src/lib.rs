//! Tangerine - Main Library
//!
//! Tangerine is the backend of a small wellness platform. Members register and
//! sign in with email and password, practitioners publish blog posts, and every
//! page and API is gated by a two-tier role model (`user`, `practitioner`).
//!
//! # Overview
//!
//! This library provides:
//! - Credential storage with bcrypt password hashing
//! - Stateless session tokens (HS256 JWT) carrying identity and role
//! - A single-pass authorization guard shared by pages and APIs
//! - Dispatch adapters turning guard decisions into redirects or 401/403 responses
//! - Practitioner-only blog post creation
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared with clients (roles, validation errors)
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and middleware
//!   - Authentication, session tokens, authorization guard
//!   - PostgreSQL or in-memory persistence
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use tangerine::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: `POST /api/auth/register` stores a user with a bcrypt hash
//! 2. **Login**: `POST /api/auth/login` verifies credentials and mints a token
//! 3. **Requests**: the token travels as `Authorization: Bearer` or session cookie
//! 4. **Guard**: each request is checked independently against the required roles

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
