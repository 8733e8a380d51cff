//! Session and password constants.

use chrono::Duration;

/// Lifetime of a session after creation or its most recent renewal.
pub const EXPIRATION_WINDOW: Duration = Duration::days(30);

/// [`EXPIRATION_WINDOW`] in milliseconds.
pub const EXPIRATION_IN_MILLISECONDS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Random bytes per session token. Tokens are hex encoded, so twice as many
/// characters.
pub const TOKEN_BYTES: usize = 48;

/// Length of a session token in characters.
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Bcrypt cost used in production.
pub const PRODUCTION_BCRYPT_COST: u32 = 14;

/// Bcrypt cost used everywhere else (bcrypt's minimum).
pub const DEVELOPMENT_BCRYPT_COST: u32 = 4;

/// User-facing messages.
pub mod messages {
    /// No valid session for the presented token.
    pub const NO_ACTIVE_SESSION: &str = "User does not have an active session.";
    /// Suggested action for [`NO_ACTIVE_SESSION`].
    pub const NO_ACTIVE_SESSION_ACTION: &str = "Check that this user is logged in and try again.";

    /// Login rejected.
    pub const INVALID_CREDENTIALS: &str = "Authentication data does not match.";
    /// Suggested action for [`INVALID_CREDENTIALS`].
    pub const INVALID_CREDENTIALS_ACTION: &str = "Check that the email and password are correct.";

    /// Email already registered.
    pub const EMAIL_TAKEN: &str = "The email provided is already in use.";
    /// Suggested action for [`EMAIL_TAKEN`].
    pub const EMAIL_TAKEN_ACTION: &str = "Use another email to complete this operation.";

    /// Username already registered.
    pub const USERNAME_TAKEN: &str = "The username provided is already in use.";
    /// Suggested action for [`USERNAME_TAKEN`].
    pub const USERNAME_TAKEN_ACTION: &str = "Use another username to complete this operation.";

    /// Unknown username.
    pub const USER_NOT_FOUND: &str = "The user was not found in the system.";
    /// Suggested action for [`USER_NOT_FOUND`].
    pub const USER_NOT_FOUND_ACTION: &str = "Check that the username is typed correctly.";

    /// Suggested action for malformed input.
    pub const INVALID_INPUT_ACTION: &str = "Check the submitted data and try again.";
}
