//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── api_routes.rs   - JSON API endpoints (auth, blog)
//! └── page_routes.rs  - Page-data endpoints
//! ```
//!
//! ## API Routes
//!
//! - `POST /api/auth/register` - User registration
//! - `POST /api/auth/login` - User login
//! - `POST /api/auth/logout` - Clear session cookie
//! - `GET /api/auth/me` - Get current user
//! - `POST /api/blog/create` - Create a blog post (practitioners)
//!
//! ## Page Routes
//!
//! - `GET /` - Sign-in entry point
//! - `GET /unauthorized` - Shown after a role mismatch
//! - `GET /dashboard/user`, `/dashboard/practitioner`, `/dashboard/practitioner/create`
//!
//! Plus `GET /health`.

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// Page-data routes
pub mod page_routes;

pub use router::create_router;
