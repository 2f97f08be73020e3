/**
 * Session Tokens
 *
 * Mints and validates the signed, stateless token that proves identity and
 * role. Tokens are HS256 JWTs signed with the server secret; nothing is stored
 * server-side, so validity is purely signature + expiry.
 *
 * Expiry is checked against the injected `Clock` with no leeway: a token is
 * rejected from the instant `now >= exp`.
 */

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::clock::Clock;
use crate::backend::auth::users::User;
use crate::shared::Role;

/// Default token lifetime in days
pub const DEFAULT_TTL_DAYS: i64 = 30;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: Uuid,
    /// Role at mint time
    pub role: Role,
    /// Display name, when minted from a full user record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email, when minted from a full user record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Malformed token, bad signature or unexpected claims
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Signature is fine but the token is past its expiry
    #[error("token expired")]
    Expired,

    /// Encoding failed while minting
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Session token service
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionTokens {
    /// Create a token service
    ///
    /// # Arguments
    ///
    /// * `secret` - server-held signing secret
    /// * `ttl` - lifetime of minted tokens
    /// * `clock` - time source for `iat`/`exp` and expiry checks
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against `clock` in `validate`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a token carrying subject and role
    pub fn mint(&self, subject_id: Uuid, role: Role) -> Result<String, TokenError> {
        self.sign(subject_id, role, None, None)
    }

    /// Create a token for a user, also embedding name and email
    pub fn mint_for(&self, user: &User) -> Result<String, TokenError> {
        self.sign(user.id, user.role, Some(user.name.clone()), Some(user.email.clone()))
    }

    fn sign(
        &self,
        subject_id: Uuid,
        role: Role,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<String, TokenError> {
        let now = self.clock.now().timestamp();

        let claims = SessionClaims {
            sub: subject_id,
            role,
            name,
            email,
            iat: now,
            exp: now + self.ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify and decode a token
    ///
    /// # Errors
    ///
    /// * `TokenError::Invalid` - malformed, wrong signature, or bad claims
    /// * `TokenError::Expired` - current time is at or past `exp`
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(TokenError::Invalid)?;

        if self.clock.now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
