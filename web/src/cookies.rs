//! Session cookie transport and cache directives.
//!
//! The session token travels in a single cookie, `session_id`. Handlers that
//! resolve a session re-issue the cookie on every response so that the
//! browser's expiry tracks the server-side sliding window:
//!
//! ```ignore
//! let mut response = Json(user).into_response();
//! attach_session_cookie(response.headers_mut(), &session.token, &cookie_config)?;
//! apply_no_store(response.headers_mut());
//! ```

use crate::error::AppError;
use axum::http::{
    HeaderMap, HeaderValue,
    header::{CACHE_CONTROL, COOKIE, SET_COOKIE},
};
use cookie::Cookie;
use std::time::Duration;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// `Cache-Control` value for responses that depend on the caller's session.
pub const NO_STORE_CACHE_CONTROL: &str = "no-store, no-cache, max-age=0, must-revalidate";

/// Attributes of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    /// Cookie name.
    pub name: String,
    /// Cookie path.
    pub path: String,
    /// Browser-side lifetime (`Max-Age`).
    pub max_age: Duration,
    /// Whether to set the `Secure` attribute.
    pub secure: bool,
}

impl CookieConfig {
    /// Session cookie valid for `max_age`, not marked `Secure`.
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            path: "/".to_string(),
            max_age,
            secure: false,
        }
    }

    /// Set the `Secure` attribute.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Build the cookie carrying `token`.
    #[must_use]
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        let max_age = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);

        Cookie::build((self.name.clone(), token.to_string()))
            .path(self.path.clone())
            .max_age(time::Duration::seconds(max_age))
            .http_only(true)
            .secure(self.secure)
            .build()
    }
}

/// Append a `Set-Cookie` header re-issuing the session cookie for `token`.
///
/// # Errors
///
/// Returns an internal error if the serialized cookie is not a valid header
/// value, which only happens if `token` contains control characters.
pub fn attach_session_cookie(
    headers: &mut HeaderMap,
    token: &str,
    config: &CookieConfig,
) -> Result<(), AppError> {
    let value = HeaderValue::from_str(&config.session_cookie(token).to_string()).map_err(|e| {
        AppError::internal().with_source(anyhow::anyhow!("invalid Set-Cookie value: {e}"))
    })?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

/// Instruct intermediaries not to store a per-session response.
pub fn apply_no_store(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_STORE_CACHE_CONTROL));
}

/// Read the value of cookie `name` from the request headers.
///
/// Multiple `Cookie` headers are searched in order; malformed pairs are
/// skipped. Empty values count as absent.
#[must_use]
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
