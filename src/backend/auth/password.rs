/**
 * Password Hashing
 *
 * bcrypt hashing and verification. Both are CPU-bound, so they run on tokio's
 * blocking pool, at most `workers` at a time, each under a time limit.
 *
 * Plaintext passwords are moved into the worker and dropped there; they are
 * never logged.
 *
 * bcrypt only reads the first 72 bytes of its NUL-terminated input. Longer
 * passwords are refused instead of silently truncated, so two passwords
 * sharing a long prefix never verify as each other.
 */

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;

/// bcrypt cost used when nothing else is configured
pub const DEFAULT_COST: u32 = 10;

/// Longest password bcrypt hashes without truncation, in bytes
///
/// 72 bytes of bcrypt input, one of which is the NUL terminator.
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Errors raised by [`PasswordHasher`]
#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password hashing timed out")]
    Timeout,

    #[error("hashing worker failed: {0}")]
    Worker(String),
}

/// bcrypt hasher with a bounded worker pool
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl PasswordHasher {
    /// Create a hasher
    ///
    /// # Arguments
    ///
    /// * `cost` - bcrypt cost factor (4..=31)
    /// * `workers` - maximum number of concurrent hash/verify jobs (at least 1)
    /// * `timeout` - limit for a single job, including time spent queued
    pub fn new(cost: u32, workers: usize, timeout: Duration) -> Self {
        Self {
            cost,
            permits: Arc::new(Semaphore::new(workers.max(1))),
            timeout,
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    ///
    /// Fails with a bcrypt truncation error for passwords longer than
    /// [`MAX_PASSWORD_BYTES`].
    pub async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        self.run(move || bcrypt::non_truncating_hash(plaintext, cost)).await
    }

    /// Check a password against a stored digest
    ///
    /// A digest that is not valid bcrypt, or a candidate longer than
    /// [`MAX_PASSWORD_BYTES`], verifies as `false`.
    pub async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, HashError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();

        match self
            .run(move || bcrypt::non_truncating_verify(plaintext, &digest))
            .await
        {
            Err(HashError::Bcrypt(e)) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                Ok(false)
            }
            other => other,
        }
    }

    async fn run<T, F>(&self, job: F) -> Result<T, HashError>
    where
        F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
        T: Send + 'static,
    {
        let permits = self.permits.clone();

        let work = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|e| HashError::Worker(e.to_string()))?;

            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job()
            })
            .await
            .map_err(|e| HashError::Worker(e.to_string()))?
            .map_err(HashError::from)
        };

        tokio::time::timeout(self.timeout, work)
            .await
            .map_err(|_| HashError::Timeout)?
    }
}
