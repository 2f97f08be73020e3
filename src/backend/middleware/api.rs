/**
 * API Guard Middleware
 *
 * Wraps API handlers with the authorization guard. Apply with
 * `axum::middleware::from_fn_with_state(RoleGuard::new(..), require_roles)`.
 *
 * - Unauthenticated → 401 `{"error":"Unauthorized","status":401}`
 * - Forbidden → 403 `{"error":"Forbidden","status":403}`
 * - Allowed → the [`Principal`] is inserted into request extensions, where
 *   [`AuthUser`](crate::backend::middleware::auth::AuthUser) picks it up
 */

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::backend::auth::sessions::SessionTokens;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::token_from_headers;
use crate::backend::middleware::guard::{authorize, AuthDecision, DenyReason};
use crate::shared::Role;

/// Middleware state: the token service and the roles a route accepts
#[derive(Clone)]
pub struct RoleGuard {
    tokens: Arc<SessionTokens>,
    roles: Arc<[Role]>,
}

impl RoleGuard {
    /// Admit only the given roles
    pub fn new(tokens: Arc<SessionTokens>, roles: &[Role]) -> Self {
        Self {
            tokens,
            roles: Arc::from(roles),
        }
    }

    /// Admit any authenticated role
    pub fn any(tokens: Arc<SessionTokens>) -> Self {
        Self::new(tokens, &[])
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

/// Role-checking middleware
pub async fn require_roles(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = token_from_headers(request.headers());

    match authorize(&guard.tokens, token.as_deref(), &guard.roles) {
        AuthDecision::Allow(principal) => {
            tracing::debug!(
                "{} {} allowed for {}",
                request.method(),
                request.uri().path(),
                principal.subject_id
            );
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        AuthDecision::Deny(DenyReason::Unauthenticated) => {
            tracing::warn!("Unauthenticated request to {}", request.uri().path());
            BackendError::Unauthenticated.into_response()
        }
        AuthDecision::Deny(DenyReason::Forbidden) => {
            tracing::warn!("Forbidden request to {}", request.uri().path());
            BackendError::Forbidden.into_response()
        }
    }
}
