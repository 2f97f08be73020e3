/**
 * Backend Error Types
 *
 * This module defines the error type used by handlers and middleware, plus the
 * conversions from the errors of the lower layers (store, hasher, token service).
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * Decided locally and shown to the caller as-is:
 * - Missing or malformed input
 * - Duplicate email on registration
 * - Bad credentials, missing or invalid token, insufficient role
 *
 * ## Server errors
 *
 * Store, hashing and signing failures. The caller only sees a generic message;
 * the detail goes to the log.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::HashError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::users::StoreError;
use crate::shared::SharedError;

/// Generic message returned for every 5xx response
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// Each variant maps to one HTTP status code via [`BackendError::status_code`].
///
/// # Usage
///
/// ```rust
/// use tangerine::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::validation("email", "Missing required fields");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or malformed input
    #[error("{message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Registration with an email that is already taken
    #[error("User already exists")]
    DuplicateEmail,

    /// Login failed. Deliberately does not say which check failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No token, or a token that does not validate
    #[error("Unauthorized")]
    Unauthenticated,

    /// Valid token whose role is not allowed here
    #[error("Forbidden")]
    Forbidden,

    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Route exists but not for this method
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Backing store failed or timed out
    #[error("store failure: {0}")]
    StoreFailure(#[source] StoreError),

    /// Any other server-side failure (hashing, signing)
    #[error("internal error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::StoreFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    ///
    /// Server-side failures collapse to [`INTERNAL_MESSAGE`].
    pub fn message(&self) -> String {
        match self {
            Self::StoreFailure(_) | Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether this error is the server's fault
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::DuplicateEmail,
            StoreError::Validation { field, message } => Self::Validation {
                field: field.to_string(),
                message,
            },
            other => Self::StoreFailure(other),
        }
    }
}

impl From<HashError> for BackendError {
    fn from(err: HashError) -> Self {
        Self::Internal(format!("password hashing failed: {}", err))
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(e) => Self::Internal(format!("failed to sign token: {}", e)),
            TokenError::Invalid(_) | TokenError::Expired => Self::Unauthenticated,
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation { field, message },
            SharedError::UnknownRole { .. } => Self::validation("role", err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::validation("name", "Missing required fields").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(BackendError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(BackendError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::NotFound("User").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            BackendError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let error = BackendError::from(StoreError::Timeout);
        assert!(error.is_server_error());
        assert_eq!(error.message(), INTERNAL_MESSAGE);
        assert!(error.to_string().contains("timed out"));
    }

    #[test]
    fn test_from_store_error_keeps_client_variants() {
        assert!(matches!(
            BackendError::from(StoreError::DuplicateEmail),
            BackendError::DuplicateEmail
        ));
        let err = BackendError::from(StoreError::validation("email", "Email is required"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Email is required");
    }

    #[test]
    fn test_token_errors_are_unauthenticated() {
        assert!(matches!(
            BackendError::from(TokenError::Expired),
            BackendError::Unauthenticated
        ));
    }

    #[test]
    fn test_from_shared_error() {
        let err: BackendError = SharedError::unknown_role("admin").into();
        match err {
            BackendError::Validation { field, .. } => assert_eq!(field, "role"),
            _ => panic!("Expected Validation variant"),
        }
    }
}
