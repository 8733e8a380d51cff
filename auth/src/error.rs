//! Error types for authentication and account operations.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failure modes of the session, account and password layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════

    /// Email unknown or password mismatch. The two are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The caller has no usable session.
    ///
    /// Covers a missing token, an unknown or expired token and a session
    /// whose user no longer exists.
    #[error("No active session")]
    NoActiveSession,

    // ═══════════════════════════════════════════════════════════
    // Lookup Errors
    // ═══════════════════════════════════════════════════════════

    /// No unexpired session carries the token.
    #[error("Session not found")]
    SessionNotFound,

    /// No user matches the lookup key.
    #[error("User not found")]
    UserNotFound,

    // ═══════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════

    /// Another account already uses this username (case-insensitive).
    #[error("Username already in use")]
    UsernameTaken,

    /// Another account already uses this email (case-insensitive).
    #[error("Email already in use")]
    EmailTaken,

    /// Malformed input.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Hashing or verifying a password failed.
    #[error("Password hashing failed: {0}")]
    PasswordHashError(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AuthError {
    /// Returns `true` if this error is due to the caller's input or state.
    ///
    /// # Examples
    ///
    /// ```
    /// # use portico_auth::AuthError;
    /// assert!(AuthError::InvalidCredentials.is_user_error());
    /// assert!(!AuthError::DatabaseError("timeout".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !self.is_system_error()
    }

    /// Returns `true` if this error is an infrastructure fault.
    #[must_use]
    pub const fn is_system_error(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::PasswordHashError(_) | Self::InternalError(_)
        )
    }

    /// Shorthand for an [`AuthError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
