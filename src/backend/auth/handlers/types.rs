/**
 * Authentication Handler Types
 *
 * Request and response bodies for the register, login and me handlers.
 *
 * Request fields are optional at the serde level so that a missing field is
 * reported as a 400 validation error by the handler rather than a rejection
 * from the JSON extractor.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::shared::Role;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Role to register as; defaults to `user`
    #[serde(default)]
    pub role: Option<String>,
}

/// Registration response
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Login request
///
/// The role hint is accepted as either `role` or `type`.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, alias = "type")]
    pub role: Option<String>,
}

/// Login response
///
/// Contains the session token and user information. The same token is also set
/// as the session cookie.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Session token (bearer credential)
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
///
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Extract a required, non-blank string field
///
/// Returns the trimmed value.
pub(crate) fn required<'a>(
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, BackendError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BackendError::validation(field, format!("{} is required", field))),
    }
}
