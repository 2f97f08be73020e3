/**
 * Authorization Guard
 *
 * `authorize` is the single decision point for both pages and API routes:
 * given a token (or none) and the roles a route accepts, it either allows the
 * request with the token's principal or denies it with a reason.
 *
 * The decision is pure: it only reads the signing secret and the clock, and
 * trusts the role embedded in the token at mint time.
 */

use uuid::Uuid;

use crate::backend::auth::sessions::{SessionClaims, SessionTokens};
use crate::shared::Role;

/// The validated identity an allowed request carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject_id: Uuid,
    pub role: Role,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<SessionClaims> for Principal {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject_id: claims.sub,
            role: claims.role,
            name: claims.name,
            email: claims.email,
        }
    }
}

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No token, or the token did not validate
    Unauthenticated,
    /// Valid token with a role outside the required set
    Forbidden,
}

/// Outcome of [`authorize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow(Principal),
    Deny(DenyReason),
}

impl AuthDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Decide whether a request may proceed
///
/// An empty `required` set admits any authenticated role. A blank token is
/// treated as no token.
pub fn authorize(tokens: &SessionTokens, token: Option<&str>, required: &[Role]) -> AuthDecision {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return AuthDecision::Deny(DenyReason::Unauthenticated);
    };

    let claims = match tokens.validate(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Token rejected: {}", e);
            return AuthDecision::Deny(DenyReason::Unauthenticated);
        }
    };

    if !required.is_empty() && !required.contains(&claims.role) {
        tracing::debug!(
            "Role {} not in {:?} for subject {}",
            claims.role,
            required,
            claims.sub
        );
        return AuthDecision::Deny(DenyReason::Forbidden);
    }

    AuthDecision::Allow(Principal::from(claims))
}
