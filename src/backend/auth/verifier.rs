/**
 * Credential Verification
 *
 * `CredentialVerifier` is the capability the login handler depends on. The one
 * implementation checks an email/password pair (and optional role hint)
 * against the user store and the bcrypt digest.
 *
 * Every failure the caller could learn something from (unknown email, wrong
 * password, role mismatch) collapses into `BackendError::InvalidCredentials`.
 */

use async_trait::async_trait;
use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::users::{User, UserStore};
use crate::backend::error::BackendError;
use crate::shared::Role;

/// Login credentials as submitted
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Role the client claims to log in as; must match the stored role when set
    pub role_hint: Option<Role>,
}

/// Checks submitted credentials and yields the matching user
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// # Errors
    ///
    /// * `BackendError::InvalidCredentials` - no such user, wrong password or role mismatch
    /// * `BackendError::StoreFailure` / `BackendError::Internal` - store or hasher failed
    async fn verify(&self, credentials: &Credentials) -> Result<User, BackendError>;
}

/// Password-based verifier backed by a [`UserStore`]
pub struct PasswordCredentialVerifier {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl PasswordCredentialVerifier {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl CredentialVerifier for PasswordCredentialVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<User, BackendError> {
        let Some(user) = self.users.find_by_email(&credentials.email).await? else {
            tracing::debug!("Login rejected: unknown email");
            return Err(BackendError::InvalidCredentials);
        };

        if !self.hasher.verify(&credentials.password, &user.password_hash).await? {
            tracing::debug!("Login rejected: password mismatch for user {}", user.id);
            return Err(BackendError::InvalidCredentials);
        }

        if let Some(hint) = credentials.role_hint {
            if hint != user.role {
                tracing::debug!(
                    "Login rejected: user {} is {}, not {}",
                    user.id,
                    user.role,
                    hint
                );
                return Err(BackendError::InvalidCredentials);
            }
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::{InMemoryUserStore, NewUser};
    use assert_matches::assert_matches;
    use std::time::Duration;

    async fn setup() -> (PasswordCredentialVerifier, User) {
        let hasher = PasswordHasher::new(4, 2, Duration::from_secs(10));
        let store = Arc::new(InMemoryUserStore::new());
        let digest = hasher.hash("pw123456").await.unwrap();
        let user = store
            .create(NewUser::new("Dr. Lee", "lee@clinic.com", digest, Role::Practitioner))
            .await
            .unwrap();

        (PasswordCredentialVerifier::new(store, hasher), user)
    }

    fn credentials(email: &str, password: &str, role_hint: Option<Role>) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
            role_hint,
        }
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let (verifier, user) = setup().await;

        let found = verifier
            .verify(&credentials("LEE@clinic.com", "pw123456", None))
            .await
            .unwrap();
        assert_eq!(found.id, user.id);

        let found = verifier
            .verify(&credentials("lee@clinic.com", "pw123456", Some(Role::Practitioner)))
            .await
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let (verifier, _) = setup().await;

        let unknown = verifier
            .verify(&credentials("nobody@clinic.com", "pw123456", None))
            .await;
        let wrong_password = verifier
            .verify(&credentials("lee@clinic.com", "wrong", None))
            .await;
        let wrong_role = verifier
            .verify(&credentials("lee@clinic.com", "pw123456", Some(Role::User)))
            .await;

        assert_matches!(unknown, Err(BackendError::InvalidCredentials));
        assert_matches!(wrong_password, Err(BackendError::InvalidCredentials));
        assert_matches!(wrong_role, Err(BackendError::InvalidCredentials));
    }
}
