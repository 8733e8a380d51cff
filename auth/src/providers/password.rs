//! Password hasher trait.

use crate::error::Result;
use std::future::Future;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> impl Future<Output = Result<String>> + Send;

    /// Check a plaintext password against a stored digest.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the digest is malformed or
    /// the hashing task fails. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, digest: &str) -> impl Future<Output = Result<bool>> + Send;
}
