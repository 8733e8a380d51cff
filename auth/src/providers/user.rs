//! User repository trait.

use crate::error::Result;
use crate::state::{User, UserId};
use std::future::Future;

/// User repository.
///
/// Username and email lookups ignore case. The repository stores what it is
/// given: validation, uniqueness pre-checks and hashing happen in
/// [`AccountService`](crate::accounts::AccountService).
pub trait UserRepository: Send + Sync {
    /// Get user by ID.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotFound` if no such user exists
    /// - `AuthError::DatabaseError` if the storage backend fails
    fn find_by_id(&self, id: UserId) -> impl Future<Output = Result<User>> + Send;

    /// Get user by username (case-insensitive).
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotFound` if no such user exists
    /// - `AuthError::DatabaseError` if the storage backend fails
    fn find_by_username(&self, username: &str) -> impl Future<Output = Result<User>> + Send;

    /// Get user by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotFound` if no such user exists
    /// - `AuthError::DatabaseError` if the storage backend fails
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<User>> + Send;

    /// Whether any user has this username (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the storage backend fails.
    fn username_exists(&self, username: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Whether any user has this email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the storage backend fails.
    fn email_exists(&self, email: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `AuthError::UsernameTaken` / `AuthError::EmailTaken` if a concurrent
    ///   insert won the race for the same value
    /// - `AuthError::DatabaseError` if the storage backend fails
    fn insert(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// Overwrite an existing user.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotFound` if the user does not exist
    /// - `AuthError::UsernameTaken` / `AuthError::EmailTaken` on a uniqueness
    ///   conflict
    /// - `AuthError::DatabaseError` if the storage backend fails
    fn update(&self, user: &User) -> impl Future<Output = Result<User>> + Send;
}
