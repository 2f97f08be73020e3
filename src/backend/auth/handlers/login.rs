/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Validate that email and password are present
 * 2. Verify credentials (email lookup, bcrypt check, optional role hint)
 * 3. Mint a session token
 * 4. Return token and user info, and set the session cookie
 *
 * # Security
 *
 * - Unknown email, wrong password and role mismatch all return the same 401
 * - User passwords are never logged or returned in responses
 */

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::CookieJar;

use crate::backend::auth::handlers::types::{required, AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::verifier::Credentials;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::session_cookie;
use crate::backend::server::AppState;
use crate::shared::Role;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password missing, unknown role hint
/// * `401 Unauthorized` - `{"error":"Invalid credentials"}` for any credential mismatch
/// * `500 Internal Server Error` - store, hashing or signing failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
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
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "name": "Dr. Lee",
///     "email": "lee@clinic.com",
///     "role": "practitioner"
///   }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>), BackendError> {
    let Json(request) = payload?;

    let email = required("email", &request.email)?;
    let password = request
        .password
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| BackendError::validation("password", "password is required"))?;
    let role_hint = Role::parse_optional(request.role.as_deref())?;

    tracing::debug!("Login request for: {}", email);

    let credentials = Credentials {
        email: email.to_string(),
        password,
        role_hint,
    };
    let user = state.verifier.verify(&credentials).await?;

    let token = state.tokens.mint_for(&user)?;
    let jar = jar.add(session_cookie(token.clone(), state.tokens.ttl()));

    tracing::info!("User logged in: {} ({})", user.id, user.role);

    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: UserResponse::from(&user),
        }),
    ))
}
