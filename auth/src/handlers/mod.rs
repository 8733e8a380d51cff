//! HTTP handlers for accounts and sessions.
//!
//! Handlers are thin: they parse the request, call the [`AuthGate`] or the
//! [`AccountService`], and shape the response. Domain errors become HTTP
//! errors through the `From<AuthError> for AppError` conversion below.

pub mod sessions;
pub mod user;
pub mod users;

use crate::accounts::AccountService;
use crate::constants::messages;
use crate::error::AuthError;
use crate::gate::AuthGate;
use crate::providers::{PasswordHasher, SessionStore, UserRepository};
use axum::extract::rejection::JsonRejection;
use portico_core::environment::Clock;
use portico_web::{AppError, CookieConfig};

/// Everything the auth handlers need, shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AuthContext<S, U, H, C> {
    /// Session validation and issuance.
    pub gate: AuthGate<S, U>,
    /// Registration, profile and credential operations.
    pub accounts: AccountService<U, H, C>,
    /// Session cookie attributes.
    pub cookies: CookieConfig,
}

impl<S, U, H, C> AuthContext<S, U, H, C>
where
    S: SessionStore,
    U: UserRepository + Clone,
    H: PasswordHasher,
    C: Clock,
{
    /// Assemble a context sharing one user repository between the gate and
    /// the account service.
    #[must_use]
    pub fn new(sessions: S, users: U, hasher: H, clock: C, cookies: CookieConfig) -> Self {
        Self {
            gate: AuthGate::new(sessions, users.clone()),
            accounts: AccountService::new(users, hasher, clock),
            cookies,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NoActiveSession | AuthError::SessionNotFound => Self::unauthorized(
                messages::NO_ACTIVE_SESSION,
                messages::NO_ACTIVE_SESSION_ACTION,
            ),
            AuthError::InvalidCredentials => Self::unauthorized(
                messages::INVALID_CREDENTIALS,
                messages::INVALID_CREDENTIALS_ACTION,
            ),
            AuthError::UserNotFound => {
                Self::not_found(messages::USER_NOT_FOUND, messages::USER_NOT_FOUND_ACTION)
            }
            AuthError::EmailTaken => {
                Self::validation(messages::EMAIL_TAKEN, messages::EMAIL_TAKEN_ACTION)
            }
            AuthError::UsernameTaken => {
                Self::validation(messages::USERNAME_TAKEN, messages::USERNAME_TAKEN_ACTION)
            }
            AuthError::InvalidInput { .. } => {
                Self::validation(err.to_string(), messages::INVALID_INPUT_ACTION)
            }
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError(_)
            | AuthError::InternalError(_) => Self::internal().with_source(anyhow::Error::new(err)),
        }
    }
}

/// Turn a body that failed to parse into a `ValidationError`.
pub(crate) fn invalid_body(rejection: &JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::validation(
        "The request body is not valid JSON for this endpoint.",
        messages::INVALID_INPUT_ACTION,
    )
}
