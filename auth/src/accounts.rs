//! Account registration, lookup, profile updates and credential checks.

use crate::error::{AuthError, Result};
use crate::providers::{PasswordHasher, UserRepository};
use crate::state::{NewUser, User, UserId, UserPatch, storage_instant};
use crate::utils::{validate_email, validate_password, validate_username};
use portico_core::environment::Clock;

/// Account operations over a user repository and a password hasher.
#[derive(Debug, Clone)]
pub struct AccountService<U, H, C> {
    users: U,
    hasher: H,
    clock: C,
}

impl<U, H, C> AccountService<U, H, C>
where
    U: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    /// Create an account service.
    #[must_use]
    pub const fn new(users: U, hasher: H, clock: C) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Register a new account.
    ///
    /// Email uniqueness is checked before username uniqueness, both ignoring
    /// case. The password is stored as a bcrypt digest.
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidInput` for a malformed username, email or password
    /// - `AuthError::EmailTaken` / `AuthError::UsernameTaken` on a conflict
    /// - A system error if hashing or storage fails
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        validate_username(&new_user.username)?;
        validate_email(&new_user.email)?;
        validate_password(&new_user.password)?;

        if self.users.email_exists(&new_user.email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.users.username_exists(&new_user.username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password = self.hasher.hash(&new_user.password).await?;
        let now = storage_instant(self.clock.now());

        let user = self
            .users
            .insert(&User {
                id: UserId::new(),
                username: new_user.username,
                email: new_user.email,
                password,
                created_at: now,
                updated_at: now,
            })
            .await?;

        metrics::counter!("portico_users_registered_total").increment(1);
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Look up a user by username, ignoring case.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotFound` if no user has this username
    /// - `AuthError::DatabaseError` if storage fails
    pub async fn find_by_username(&self, username: &str) -> Result<User> {
        self.users.find_by_username(username).await
    }

    /// Apply a partial update to the user currently named `username`.
    ///
    /// Changing only the case of the user's own username or email is
    /// allowed. A new password is re-hashed. `updated_at` always advances.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotFound` if no user has this username
    /// - `AuthError::InvalidInput` for malformed new values
    /// - `AuthError::UsernameTaken` / `AuthError::EmailTaken` on a conflict
    /// - A system error if hashing or storage fails
    pub async fn update(&self, username: &str, patch: UserPatch) -> Result<User> {
        let mut user = self.users.find_by_username(username).await?;

        if let Some(new_username) = patch.username {
            validate_username(&new_username)?;
            if !same_ignoring_case(&new_username, &user.username)
                && self.users.username_exists(&new_username).await?
            {
                return Err(AuthError::UsernameTaken);
            }
            user.username = new_username;
        }

        if let Some(new_email) = patch.email {
            validate_email(&new_email)?;
            if !same_ignoring_case(&new_email, &user.email)
                && self.users.email_exists(&new_email).await?
            {
                return Err(AuthError::EmailTaken);
            }
            user.email = new_email;
        }

        if let Some(new_password) = patch.password {
            validate_password(&new_password)?;
            user.password = self.hasher.hash(&new_password).await?;
        }

        user.updated_at = storage_instant(self.clock.now());

        let user = self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "User updated");

        Ok(user)
    }

    /// Check an email/password pair.
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidCredentials` if the email is unknown or the
    ///   password does not match; the two are indistinguishable
    /// - A system error if hashing or storage fails
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User> {
        let user = match self.users.find_by_email(email).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, &user.password).await? {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
