/**
 * Application State Management
 *
 * `AppState` is the central state container shared by every handler. All of
 * its fields are `Arc`s (or `Arc`-backed), so cloning it per request is cheap.
 *
 * # State Extraction
 *
 * The `FromRef` implementation lets the token service be extracted on its
 * own with `State<Arc<SessionTokens>>`.
 *
 * # Example
 *
 * ```rust
 * use tangerine::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let ttl = state.tokens.ttl();
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::clock::SystemClock;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::SessionTokens;
use crate::backend::auth::users::{InMemoryUserStore, PgUserStore, UserStore};
use crate::backend::auth::verifier::{CredentialVerifier, PasswordCredentialVerifier};
use crate::backend::blog::store::{BlogStore, InMemoryBlogStore, PgBlogStore};
use crate::backend::server::config::ServerConfig;

/// Application state
///
/// # Fields
///
/// * `users` - credential store
/// * `posts` - blog post store
/// * `tokens` - session token service (signing secret, TTL, clock)
/// * `hasher` - bcrypt hasher with its bounded worker pool
/// * `verifier` - credential verification used by login
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn BlogStore>,
    pub tokens: Arc<SessionTokens>,
    pub hasher: PasswordHasher,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Build state from configuration
    ///
    /// With a pool, users and posts live in PostgreSQL; without one they are
    /// kept in memory.
    pub fn new(config: &ServerConfig, pool: Option<PgPool>) -> Self {
        let users: Arc<dyn UserStore>;
        let posts: Arc<dyn BlogStore>;
        match pool {
            Some(pool) => {
                users = Arc::new(PgUserStore::new(pool.clone(), config.store_timeout));
                posts = Arc::new(PgBlogStore::new(pool, config.store_timeout));
            }
            None => {
                users = Arc::new(InMemoryUserStore::new());
                posts = Arc::new(InMemoryBlogStore::new());
            }
        }

        let tokens = Arc::new(SessionTokens::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl,
            Arc::new(SystemClock),
        ));
        let hasher =
            PasswordHasher::new(config.bcrypt_cost, config.hash_workers, config.hash_timeout);

        Self::from_parts(users, posts, tokens, hasher)
    }

    /// State backed by in-memory stores
    pub fn in_memory(config: &ServerConfig) -> Self {
        Self::new(config, None)
    }

    /// Assemble state from explicit components
    ///
    /// The verifier is built from `users` and `hasher`.
    pub fn from_parts(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn BlogStore>,
        tokens: Arc<SessionTokens>,
        hasher: PasswordHasher,
    ) -> Self {
        let verifier = Arc::new(PasswordCredentialVerifier::new(users.clone(), hasher.clone()));

        Self {
            users,
            posts,
            tokens,
            hasher,
            verifier,
        }
    }
}

impl FromRef<AppState> for Arc<SessionTokens> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
