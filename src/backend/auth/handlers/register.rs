/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate that name, email and password are present and non-blank
 * 2. Parse the optional role (defaults to `user`)
 * 3. Check if the email is already registered
 * 4. Hash password using bcrypt
 * 5. Create user in the store
 *
 * # Validation
 *
 * - Email must contain '@' character (basic validation)
 * - Role, when given, must be `user` or `practitioner`
 * - Email must be unique (case-insensitive)
 * - Password must fit bcrypt's input without truncation (71 bytes)
 *
 * Registration does not log the user in; the client calls login afterwards.
 */

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::{
    required, RegisterRequest, RegisterResponse, UserResponse,
};
use crate::backend::auth::password::MAX_PASSWORD_BYTES;
use crate::backend::auth::users::NewUser;
use crate::backend::error::BackendError;
use crate::backend::server::AppState;
use crate::shared::Role;

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - missing/blank field, malformed email, unknown role,
///   password longer than 71 bytes
/// * `409 Conflict` - the email is already registered
/// * `500 Internal Server Error` - hashing or store failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Dr. Lee",
///   "email": "lee@clinic.com",
///   "password": "pw123456",
///   "role": "practitioner"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "message": "User registered successfully",
///   "user": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "name": "Dr. Lee",
///     "email": "lee@clinic.com",
///     "role": "practitioner"
///   }
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    let Json(request) = payload?;

    let name = required("name", &request.name)?;
    let email = required("email", &request.email)?;
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| BackendError::validation("password", "password is required"))?;

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(BackendError::validation(
            "password",
            format!("password must be at most {} bytes", MAX_PASSWORD_BYTES),
        ));
    }

    if !email.contains('@') {
        tracing::warn!("Invalid email format on registration");
        return Err(BackendError::validation("email", "Invalid email format"));
    }

    let role = Role::parse_optional(request.role.as_deref())?.unwrap_or_default();

    tracing::info!("Registration request as {}", role);

    if state.users.find_by_email(email).await?.is_some() {
        tracing::warn!("Registration rejected: email already registered");
        return Err(BackendError::DuplicateEmail);
    }

    let password_hash = state.hasher.hash(password).await?;

    // The store re-checks uniqueness atomically; a concurrent registration
    // surfaces here as DuplicateEmail.
    let user = state
        .users
        .create(NewUser::new(name, email, password_hash, role))
        .await?;

    tracing::info!("User registered: {} ({})", user.id, user.role);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}
