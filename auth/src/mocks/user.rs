//! Mock user repository for testing.

use crate::error::{AuthError, Result};
use crate::providers::UserRepository;
use crate::state::{User, UserId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

fn poisoned() -> AuthError {
    AuthError::InternalError("user repository lock poisoned".to_string())
}

fn same(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Find a uniqueness conflict between `user` and any other stored user.
fn conflict(users: &HashMap<UserId, User>, user: &User) -> Option<AuthError> {
    let others = || users.values().filter(|other| other.id != user.id);

    if others().any(|other| same(&other.username, &user.username)) {
        return Some(AuthError::UsernameTaken);
    }
    if others().any(|other| same(&other.email, &user.email)) {
        return Some(AuthError::EmailTaken);
    }
    None
}

/// Mock user repository.
///
/// In-memory, with the same case-insensitive uniqueness rules as the
/// `users` table. Clones share storage.
#[derive(Debug, Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl MockUserRepository {
    /// Create a new mock user repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether a user with this ID is stored.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn contains(&self, id: UserId) -> Result<bool> {
        Ok(self.users.lock().map_err(|_| poisoned())?.contains_key(&id))
    }

    /// Remove a user, returning it if present.
    ///
    /// Sessions referencing the user are left in place, which lets tests
    /// exercise a session that outlives its owner.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn remove(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.lock().map_err(|_| poisoned())?.remove(&id))
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn user_count(&self) -> Result<usize> {
        Ok(self.users.lock().map_err(|_| poisoned())?.len())
    }

    fn find_where(
        &self,
        predicate: impl Fn(&User) -> bool + Send + 'static,
    ) -> impl Future<Output = Result<User>> + Send {
        let users = Arc::clone(&self.users);

        async move {
            users
                .lock()
                .map_err(|_| poisoned())?
                .values()
                .find(|user| predicate(user))
                .cloned()
                .ok_or(AuthError::UserNotFound)
        }
    }

    fn any_where(
        &self,
        predicate: impl Fn(&User) -> bool + Send + 'static,
    ) -> impl Future<Output = Result<bool>> + Send {
        let users = Arc::clone(&self.users);

        async move {
            Ok(users
                .lock()
                .map_err(|_| poisoned())?
                .values()
                .any(|user| predicate(user)))
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for MockUserRepository {
    fn find_by_id(&self, id: UserId) -> impl Future<Output = Result<User>> + Send {
        self.find_where(move |user| user.id == id)
    }

    fn find_by_username(&self, username: &str) -> impl Future<Output = Result<User>> + Send {
        let username = username.to_string();
        self.find_where(move |user| same(&user.username, &username))
    }

    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<User>> + Send {
        let email = email.to_string();
        self.find_where(move |user| same(&user.email, &email))
    }

    fn username_exists(&self, username: &str) -> impl Future<Output = Result<bool>> + Send {
        let username = username.to_string();
        self.any_where(move |user| same(&user.username, &username))
    }

    fn email_exists(&self, email: &str) -> impl Future<Output = Result<bool>> + Send {
        let email = email.to_string();
        self.any_where(move |user| same(&user.email, &email))
    }

    fn insert(&self, user: &User) -> impl Future<Output = Result<User>> + Send {
        let users = Arc::clone(&self.users);
        let user = user.clone();

        async move {
            let mut guard = users.lock().map_err(|_| poisoned())?;

            if guard.contains_key(&user.id) {
                return Err(AuthError::DatabaseError(
                    "duplicate key value violates unique constraint \"users_pkey\"".to_string(),
                ));
            }
            if let Some(err) = conflict(&guard, &user) {
                return Err(err);
            }

            guard.insert(user.id, user.clone());
            Ok(user)
        }
    }

    fn update(&self, user: &User) -> impl Future<Output = Result<User>> + Send {
        let users = Arc::clone(&self.users);
        let user = user.clone();

        async move {
            let mut guard = users.lock().map_err(|_| poisoned())?;

            if !guard.contains_key(&user.id) {
                return Err(AuthError::UserNotFound);
            }
            if let Some(err) = conflict(&guard, &user) {
                return Err(err);
            }

            guard.insert(user.id, user.clone());
            Ok(user)
        }
    }
}
