/**
 * Session Transport and Extractors
 *
 * The session token travels either as `Authorization: Bearer <token>` or as the
 * `tangerine_session` cookie set at login. This module reads it from a request
 * (header first, then cookie) and builds the cookies login and logout set.
 *
 * The extractors here only read transport. Deciding what a token is worth is
 * left to [`authorize`](crate::backend::middleware::guard::authorize).
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;

use crate::backend::error::BackendError;
use crate::backend::middleware::guard::Principal;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "tangerine_session";

/// Read the session token from request headers
///
/// A bearer `Authorization` header wins over the cookie. Blank values count as
/// absent.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Session cookie carrying a freshly minted token
pub fn session_cookie(token: String, ttl: chrono::Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

/// Expired, empty session cookie that makes the browser drop the old one
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// The raw session token of a request, if any
///
/// Never rejects; pass the inner value to `authorize`.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(token_from_headers(&parts.headers)))
    }
}

/// Axum extractor for the authenticated principal
///
/// Only works behind the API guard, which places the [`Principal`] in request
/// extensions. Without it the request is rejected as unauthenticated.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts.extensions.get::<Principal>().cloned().ok_or_else(|| {
            tracing::warn!("Principal not found in request extensions");
            BackendError::Unauthenticated
        })?;

        Ok(AuthUser(principal))
    }
}
