//! Authentication gate.
//!
//! Resolves the token a client presents into the session and the user it
//! belongs to. Any reason the caller is not authenticated (no token, unknown
//! token, expired session, deleted user) becomes the same
//! [`AuthError::NoActiveSession`], so responses never reveal which one it
//! was. Storage failures are not folded in; they propagate unchanged and are
//! logged once, where they become a response.
//!
//! The gate does not touch the response. Handlers that accept the result are
//! expected to re-issue the session cookie and mark the response
//! non-cacheable themselves.

use crate::error::{AuthError, Result};
use crate::providers::{SessionStore, UserRepository};
use crate::state::{Session, User, UserId};

/// A request that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    /// The session, already renewed.
    pub session: Session,
    /// The session's owner.
    pub user: User,
}

/// Session-based authentication.
#[derive(Debug, Clone)]
pub struct AuthGate<S, U> {
    sessions: S,
    users: U,
}

impl<S, U> AuthGate<S, U>
where
    S: SessionStore,
    U: UserRepository,
{
    /// Create a gate over the given stores.
    #[must_use]
    pub const fn new(sessions: S, users: U) -> Self {
        Self { sessions, users }
    }

    /// Validate `token`, renew its session and load the owner.
    ///
    /// # Errors
    ///
    /// - `AuthError::NoActiveSession` if the token is absent, empty, unknown
    ///   or expired, or its user no longer exists
    /// - `AuthError::DatabaseError` (or another system error) if a store fails
    pub async fn authenticate(&self, token: Option<&str>) -> Result<Authenticated> {
        let Some(token) = token.filter(|token| !token.is_empty()) else {
            tracing::debug!("No session token presented");
            reject("missing_token");
            return Err(AuthError::NoActiveSession);
        };

        let session = match self.sessions.find_one_valid_by_token(token).await {
            Ok(session) => session,
            Err(AuthError::SessionNotFound) => {
                tracing::debug!("Session token not found or expired");
                reject("invalid_token");
                return Err(AuthError::NoActiveSession);
            }
            Err(e) => return Err(e),
        };

        let user = match self.users.find_by_id(session.user_id).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                tracing::warn!(
                    session_id = %session.id,
                    user_id = %session.user_id,
                    "Session references a missing user"
                );
                reject("missing_user");
                return Err(AuthError::NoActiveSession);
            }
            Err(e) => return Err(e),
        };

        metrics::counter!("portico_sessions_renewed_total").increment(1);
        tracing::debug!(
            session_id = %session.id,
            user_id = %user.id,
            expires_at = %session.expires_at,
            "Session renewed"
        );

        Ok(Authenticated { session, user })
    }

    /// Open a new session for `user_id`.
    ///
    /// # Errors
    ///
    /// Propagates the session store's error, e.g. `AuthError::DatabaseError`
    /// for an unknown user.
    pub async fn open_session(&self, user_id: UserId) -> Result<Session> {
        let session = self.sessions.create(user_id).await?;

        metrics::counter!("portico_sessions_created_total").increment(1);
        tracing::info!(
            session_id = %session.id,
            user_id = %user_id,
            expires_at = %session.expires_at,
            "Session created"
        );

        Ok(session)
    }
}

fn reject(reason: &'static str) {
    metrics::counter!("portico_auth_rejections_total", "reason" => reason).increment(1);
}
