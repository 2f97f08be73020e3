//! Shared Error Types
//!
//! This module defines error types that are shared between the backend and any
//! client code that works with the platform's wire types (roles, request bodies).
//!
//! # Error Categories
//!
//! - `ValidationError` - A field failed validation
//! - `UnknownRole` - A role string outside the closed `{user, practitioner}` set
//!
//! # Usage
//!
//! ```rust
//! use tangerine::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email is required");
//! assert!(error.to_string().contains("email"));
//! ```
use thiserror::Error;

/// Shared error types that can occur wherever wire types are parsed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Role string that is neither `user` nor `practitioner`
    #[error("Unknown role '{value}'")]
    UnknownRole {
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-role error
    pub fn unknown_role(value: impl Into<String>) -> Self {
        Self::UnknownRole {
            value: value.into(),
        }
    }
}
