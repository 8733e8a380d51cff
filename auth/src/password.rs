//! Bcrypt password hasher.
//!
//! Bcrypt is deliberately slow (cost 14 takes around a second), so both
//! operations run on the blocking thread pool.

use crate::config::PasswordConfig;
use crate::error::{AuthError, Result};
use crate::providers::PasswordHasher;

/// [`PasswordHasher`] backed by the `bcrypt` crate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with the configured cost.
    #[must_use]
    pub const fn new(config: PasswordConfig) -> Self {
        Self { cost: config.cost }
    }

    /// Cost factor embedded in new digests.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::PasswordHashError(format!("Hashing task failed: {e}")))?
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }

    async fn verify(&self, password: &str, digest: &str) -> Result<bool> {
        let password = password.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest))
            .await
            .map_err(|e| AuthError::PasswordHashError(format!("Verification task failed: {e}")))?
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::constants::DEVELOPMENT_BCRYPT_COST;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(PasswordConfig::new(DEVELOPMENT_BCRYPT_COST))
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = hasher();
        let digest = hasher.hash("correct horse").await.unwrap();

        assert_ne!(digest, "correct horse");
        assert_eq!(digest.len(), 60);
        assert!(hasher.verify("correct horse", &digest).await.unwrap());
        assert!(!hasher.verify("wrong horse", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn test_digest_embeds_cost() {
        let digest = hasher().hash("pw").await.unwrap();
        assert!(digest.starts_with("$2b$04$"));
    }

    #[tokio::test]
    async fn test_same_password_different_salt() {
        let hasher = hasher();
        let first = hasher.hash("pw").await.unwrap();
        let second = hasher.hash("pw").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_digest_is_error() {
        let result = hasher().verify("pw", "not-a-bcrypt-digest").await;
        assert!(matches!(result, Err(AuthError::PasswordHashError(_))));
    }
}
