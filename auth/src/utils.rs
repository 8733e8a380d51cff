//! Input validation helpers.

use crate::error::{AuthError, Result};

/// Longest accepted username.
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Validate email address format.
///
/// Basic structural check:
/// - Exactly one `@`, non-empty local and domain parts
/// - Domain has at least one dot and no empty labels
/// - Length between 3 and 254 characters
///
/// # Examples
///
/// ```
/// use portico_auth::utils::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(is_valid_email("user+tag@subdomain.example.com"));
/// assert!(!is_valid_email("invalid"));
/// assert!(!is_valid_email("@example.com"));
/// assert!(!is_valid_email("user@"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    let valid_local_chars = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '_');
    let valid_domain_chars = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-');

    local.chars().all(valid_local_chars)
        && domain.chars().all(valid_domain_chars)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Validate a username: 1 to 30 characters, letters, digits, `_` or `-`.
///
/// # Errors
///
/// Returns [`AuthError::InvalidInput`] describing the violation.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(AuthError::invalid_input("username", "must not be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AuthError::invalid_input(
            "username",
            format!("must be at most {MAX_USERNAME_LENGTH} characters"),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AuthError::invalid_input(
            "username",
            "may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}

/// Validate an email address.
///
/// # Errors
///
/// Returns [`AuthError::InvalidInput`] if the format is not accepted.
pub fn validate_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AuthError::invalid_input("email", "is not a valid address"))
    }
}

/// Validate a plaintext password.
///
/// Bcrypt only reads the first 72 bytes, so longer inputs are rejected
/// rather than silently truncated.
///
/// # Errors
///
/// Returns [`AuthError::InvalidInput`] if empty or longer than 72 bytes.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(AuthError::invalid_input("password", "must not be empty"));
    }
    if password.len() > 72 {
        return Err(AuthError::invalid_input("password", "must be at most 72 bytes"));
    }
    Ok(())
}
