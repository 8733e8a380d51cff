//! Session store trait.

use crate::error::Result;
use crate::state::{Session, UserId};
use std::future::Future;

/// Session store.
///
/// Implementations own the clock: every timestamp they write is derived from
/// a single `now` sample per call, so `expires_at == updated_at + window`
/// holds for every record they return.
///
/// # Implementation Notes
///
/// - Tokens are unique; a collision fails the call instead of retrying
/// - Lookup and renewal are one atomic operation
/// - Expired sessions are never deleted, only ignored
pub trait SessionStore: Send + Sync {
    /// Create a session for `user_id` with a fresh token.
    ///
    /// `created_at = updated_at = now`, `expires_at = now + window`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if:
    /// - `user_id` does not reference an existing user
    /// - The generated token collides with an existing one
    /// - The storage backend fails
    fn create(&self, user_id: UserId) -> impl Future<Output = Result<Session>> + Send;

    /// Find the unexpired session carrying `token` and renew it.
    ///
    /// On a match, `updated_at` becomes `now` and `expires_at` becomes
    /// `now + window`, unless an overlapping lookup already stored a later
    /// renewal; timestamps never move backward. The stored record is
    /// returned.
    ///
    /// # Errors
    ///
    /// - `AuthError::SessionNotFound` if no session has this token or it has
    ///   expired (`expires_at <= now`). The two cases are not distinguished.
    /// - `AuthError::DatabaseError` if the storage backend fails.
    fn find_one_valid_by_token(&self, token: &str)
    -> impl Future<Output = Result<Session>> + Send;
}
