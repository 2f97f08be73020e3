//! Shared Module
//!
//! This module contains types that are shared between the backend and anything
//! that talks to it. These types are plain data and serialize the same way on
//! every side of the wire.
//!
//! # Overview
//!
//! - **`role`** - The closed `{user, practitioner}` role set
//! - **`error`** - Validation errors raised while parsing wire types

/// Role enum
pub mod role;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use role::Role;
