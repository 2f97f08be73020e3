/**
 * Logout Handler
 *
 * POST /api/auth/logout clears the session cookie. Tokens are stateless, so a
 * copy of the token held elsewhere stays valid until it expires.
 */

use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use crate::backend::middleware::auth::removal_cookie;

/// Logout handler
///
/// Always answers 204 No Content.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    tracing::debug!("Clearing session cookie");
    (jar.add(removal_cookie()), StatusCode::NO_CONTENT)
}
