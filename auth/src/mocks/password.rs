//! Mock password hasher for testing.

use crate::error::{AuthError, Result};
use crate::providers::PasswordHasher;
use std::future::Future;

const PREFIX: &str = "mock$";

/// Mock password hasher.
///
/// Reversible and instant: the digest is the password behind a fixed
/// prefix. Digests without the prefix are treated as malformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPasswordHasher;

impl MockPasswordHasher {
    /// Create a new mock hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> impl Future<Output = Result<String>> + Send {
        let digest = format!("{PREFIX}{password}");
        async move { Ok(digest) }
    }

    fn verify(&self, password: &str, digest: &str) -> impl Future<Output = Result<bool>> + Send {
        let result = digest
            .strip_prefix(PREFIX)
            .map(|stored| stored == password)
            .ok_or_else(|| AuthError::PasswordHashError("invalid mock digest".to_string()));
        async move { result }
    }
}
