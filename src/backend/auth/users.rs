/**
 * User Model and Credential Store
 *
 * This module defines the user record and the `UserStore` trait, with a
 * PostgreSQL implementation and an in-memory one (used when no database is
 * configured, and in tests).
 *
 * Emails are normalized (trimmed, lowercased) before they are stored or looked
 * up, so uniqueness is case-insensitive.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::Role;

/// User struct representing a registered account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user ID (UUID), assigned on creation
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Normalized email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Authorization tier
    pub role: Role,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for [`UserStore::create`]
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
        }
    }

    /// Trim and normalize the fields, rejecting blanks
    fn validated(self) -> Result<Self, StoreError> {
        let name = self.name.trim().to_string();
        let email = normalize_email(&self.email);

        if name.is_empty() {
            return Err(StoreError::validation("name", "Name is required"));
        }
        if email.is_empty() {
            return Err(StoreError::validation("email", "Email is required"));
        }
        if self.password_hash.is_empty() {
            return Err(StoreError::validation("password", "Password is required"));
        }

        Ok(Self {
            name,
            email,
            password_hash: self.password_hash,
            role: self.role,
        })
    }
}

/// Errors raised by credential and content stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before reaching storage
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Unique email constraint violated
    #[error("email is already registered")]
    DuplicateEmail,

    /// The store did not answer within the configured limit
    #[error("store operation timed out")]
    Timeout,

    /// A stored row could not be mapped back to a domain value
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    /// Database driver error
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::DuplicateEmail,
            _ => Self::Database(err),
        }
    }
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Run a database future under a time limit
pub(crate) async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| StoreError::Timeout)?
        .map_err(StoreError::from)
}

/// Persistent repository of users keyed by email
///
/// Implementations must make `create` atomic with respect to the email
/// uniqueness check.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get user by email (normalized before lookup)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Get user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Create a new user
    ///
    /// # Errors
    ///
    /// * `StoreError::Validation` - name, email or password hash is blank
    /// * `StoreError::DuplicateEmail` - the normalized email is already registered
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::Corrupt(format!("user {}: {}", row.id, e)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = bounded(
            self.timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, name, email, password_hash, role, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(normalize_email(email))
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = bounded(
            self.timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, name, email, password_hash, role, created_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.validated()?;

        let row = bounded(
            self.timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (id, name, email, password_hash, role, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, name, email, password_hash, role, created_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(Utc::now())
            .fetch_one(&self.pool),
        )
        .await?;

        User::try_from(row)
    }
}

/// In-memory user store
///
/// Keyed by normalized email; the write lock makes check-and-insert atomic.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&normalize_email(email)).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.validated()?;
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email.clone(),
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        users.insert(user.email, created.clone());

        Ok(created)
    }
}
