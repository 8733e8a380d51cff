//! Authentication configuration.
//!
//! Environment-dependent settings are resolved once, at startup, into these
//! structs. Nothing in this crate reads the process environment.

use crate::constants::{DEVELOPMENT_BCRYPT_COST, EXPIRATION_WINDOW, PRODUCTION_BCRYPT_COST};
use chrono::Duration;
use portico_core::environment::RuntimeEnvironment;

/// Password hashing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Bcrypt cost factor.
    pub cost: u32,
}

impl PasswordConfig {
    /// Create a configuration with an explicit cost.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Cost 14 in production, the bcrypt minimum elsewhere.
    #[must_use]
    pub const fn for_environment(environment: RuntimeEnvironment) -> Self {
        if environment.is_production() {
            Self::new(PRODUCTION_BCRYPT_COST)
        } else {
            Self::new(DEVELOPMENT_BCRYPT_COST)
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self::for_environment(RuntimeEnvironment::default())
    }
}

/// Session and cookie settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    /// Sliding expiration window.
    ///
    /// Default: 30 days
    pub session_window: Duration,

    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookies: bool,

    /// Password hashing settings.
    pub password: PasswordConfig,
}

impl AuthSettings {
    /// Settings for the given runtime environment.
    ///
    /// Production gets `Secure` cookies and full bcrypt cost.
    #[must_use]
    pub const fn for_environment(environment: RuntimeEnvironment) -> Self {
        Self {
            session_window: EXPIRATION_WINDOW,
            secure_cookies: environment.is_production(),
            password: PasswordConfig::for_environment(environment),
        }
    }

    /// Cookie attributes matching these settings.
    #[cfg(feature = "axum")]
    #[must_use]
    pub fn cookie_config(&self) -> portico_web::CookieConfig {
        let max_age = self.session_window.to_std().unwrap_or_default();
        portico_web::CookieConfig::new(max_age).with_secure(self.secure_cookies)
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self::for_environment(RuntimeEnvironment::default())
    }
}
