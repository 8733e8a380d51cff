//! Mock session store for testing.

use crate::constants::EXPIRATION_WINDOW;
use crate::error::{AuthError, Result};
use crate::mocks::MockUserRepository;
use crate::providers::SessionStore;
use crate::state::{Session, SessionId, UserId, storage_instant};
use crate::token::generate_token;
use chrono::Duration;
use portico_core::environment::Clock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

fn poisoned() -> AuthError {
    AuthError::InternalError("session store lock poisoned".to_string())
}

/// Mock session store.
///
/// In-memory, keyed by token, reading time from an injected clock. When
/// built [`with_users`](Self::with_users) it also enforces the foreign key
/// to the user repository the way the `sessions` table does.
#[derive(Debug, Clone)]
pub struct MockSessionStore<C> {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    users: Option<MockUserRepository>,
    clock: C,
    window: Duration,
}

impl<C: Clock> MockSessionStore<C> {
    /// Create an empty store using `clock` for every timestamp.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            users: None,
            clock,
            window: EXPIRATION_WINDOW,
        }
    }

    /// Reject sessions for users missing from `users`.
    #[must_use]
    pub fn with_users(mut self, users: MockUserRepository) -> Self {
        self.users = Some(users);
        self
    }

    /// Override the expiration window.
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Store a session as-is, bypassing token generation and the clock.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn insert_session(&self, session: Session) -> Result<()> {
        self.sessions
            .lock()
            .map_err(|_| poisoned())?
            .insert(session.token.clone(), session);
        Ok(())
    }

    /// Read a session without validating or renewing it.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn peek(&self, token: &str) -> Result<Option<Session>> {
        Ok(self
            .sessions
            .lock()
            .map_err(|_| poisoned())?
            .get(token)
            .cloned())
    }

    /// Get count of stored sessions, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self.sessions.lock().map_err(|_| poisoned())?.len())
    }
}

impl<C: Clock> SessionStore for MockSessionStore<C> {
    fn create(&self, user_id: UserId) -> impl Future<Output = Result<Session>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let user_exists = self
            .users
            .as_ref()
            .map_or(Ok(true), |users| users.contains(user_id));
        let now = storage_instant(self.clock.now());
        let window = self.window;

        async move {
            if !user_exists? {
                return Err(AuthError::DatabaseError(format!(
                    "insert on table \"sessions\" violates foreign key constraint: user {user_id} does not exist"
                )));
            }

            let session = Session {
                id: SessionId::new(),
                token: generate_token(),
                user_id,
                expires_at: now + window,
                created_at: now,
                updated_at: now,
            };

            let mut guard = sessions.lock().map_err(|_| poisoned())?;
            if guard.contains_key(&session.token) {
                return Err(AuthError::DatabaseError(
                    "duplicate key value violates unique constraint \"sessions_token_key\""
                        .to_string(),
                ));
            }
            guard.insert(session.token.clone(), session.clone());

            Ok(session)
        }
    }

    fn find_one_valid_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Session>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let token = token.to_string();
        let now = storage_instant(self.clock.now());
        let window = self.window;

        async move {
            let mut guard = sessions.lock().map_err(|_| poisoned())?;

            let session = guard
                .get_mut(&token)
                .filter(|session| session.is_active_at(now))
                .ok_or(AuthError::SessionNotFound)?;

            // A renewal sampled earlier may land after a later one.
            session.updated_at = session.updated_at.max(now);
            session.expires_at = session.expires_at.max(now + window);

            Ok(session.clone())
        }
    }
}
