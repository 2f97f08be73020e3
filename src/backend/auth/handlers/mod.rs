//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── logout.rs   - Session cookie removal
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - Clear session cookie
//! - **`get_me`** - GET /api/auth/me - Get current user info
//!
//! All of them take `State<AppState>` (except logout) and fail with
//! `BackendError`, which renders as `{"error": ..., "status": ...}`.

use crate::backend::error::BackendError;

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

pub use types::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, UserResponse};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;

/// Fallback for routes hit with an unsupported method
pub async fn method_not_allowed() -> BackendError {
    BackendError::MethodNotAllowed
}
