//! Middleware Module
//!
//! Request-side authorization for the backend server.
//!
//! # Architecture
//!
//! - **`guard`** - `authorize`: token + required roles → allow or deny
//! - **`auth`** - reading the session token (bearer header, then cookie), the
//!   session cookies, and the `SessionToken` / `AuthUser` extractors
//! - **`api`** - `require_roles` middleware answering 401/403 JSON for API routes
//! - **`page`** - `guard_page` wrapping page loaders, answering with redirects
//!
//! # Example
//!
//! ```rust,no_run
//! use tangerine::backend::middleware::{require_roles, RoleGuard};
//! use tangerine::backend::auth::SessionTokens;
//! use tangerine::shared::Role;
//! use axum::{middleware::from_fn_with_state, routing::post, Router};
//! use std::sync::Arc;
//!
//! # fn example(tokens: Arc<SessionTokens>) {
//! let router: Router = Router::new()
//!     .route("/api/blog/create", post(|| async { "created" }))
//!     .route_layer(from_fn_with_state(
//!         RoleGuard::new(tokens, &[Role::Practitioner]),
//!         require_roles,
//!     ));
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod guard;
pub mod page;

pub use api::{require_roles, RoleGuard};
pub use auth::{token_from_headers, AuthUser, SessionToken, SESSION_COOKIE};
pub use guard::{authorize, AuthDecision, DenyReason, Principal};
pub use page::{guard_page, guard_page_props, PageContext, PageOutcome};
