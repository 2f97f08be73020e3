//! Authentication Module
//!
//! This module handles user registration, credential verification and session
//! tokens. It provides the HTTP handlers for the authentication endpoints and
//! the components they are built from.
//!
//! # Architecture
//!
//! - **`users`** - User model and the credential store (`UserStore`)
//! - **`password`** - bcrypt hashing on a bounded blocking pool
//! - **`sessions`** - Session token minting and validation (JWT)
//! - **`clock`** - Time source for token issue/expiry
//! - **`verifier`** - `CredentialVerifier` capability and its password implementation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model, PostgreSQL and in-memory stores
//! ├── password.rs     - Password hashing
//! ├── sessions.rs     - Token management
//! ├── clock.rs        - Clock abstraction
//! ├── verifier.rs     - Credential verification
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - Login handler
//!     ├── logout.rs   - Logout handler
//!     └── me.rs       - Current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password (+ role) → user stored with bcrypt hash
//! 2. **Login**: email, password (+ role hint) → credentials verified → token returned
//! 3. **Me**: token → guard → user info returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt (cost 10 by default) and never logged
//! - Tokens are stateless and expire after 30 days by default
//! - Invalid credentials return a single generic 401
//! - There is no revocation: a token stays valid until it expires

/// User data model and credential store
pub mod users;

/// Password hashing
pub mod password;

/// Session token generation and validation
pub mod sessions;

/// Time source
pub mod clock;

/// Credential verification
pub mod verifier;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use clock::{Clock, FixedClock, SystemClock};
pub use handlers::types::{
    AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, UserResponse,
};
pub use handlers::{get_me, login, logout, register};
pub use password::PasswordHasher;
pub use sessions::{SessionClaims, SessionTokens};
pub use users::{InMemoryUserStore, NewUser, PgUserStore, User, UserStore};
pub use verifier::{CredentialVerifier, Credentials, PasswordCredentialVerifier};
