//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and the
//! middleware. Every variant maps to exactly one HTTP status code.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and conversions from component errors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! | Variant | Status |
//! |---|---|
//! | `Validation` | 400 |
//! | `InvalidCredentials`, `Unauthenticated` | 401 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `MethodNotAllowed` | 405 |
//! | `DuplicateEmail` | 409 |
//! | `StoreFailure`, `Internal` | 500 |
//!
//! Server-side failures (5xx) are logged with their cause and answered with a
//! generic message; the cause never reaches the client.
//!
//! # Example
//!
//! ```rust,no_run
//! use tangerine::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::Forbidden)
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
