//! # Portico Core
//!
//! Environment abstractions shared by every Portico crate.
//!
//! Anything that would otherwise be read from ambient process state (the
//! current time, whether we run in production) is modelled here as a value
//! that is injected into components at construction. This keeps the session
//! lifecycle testable without touching the system clock or environment
//! variables.
//!
//! ## Example
//!
//! ```
//! use portico_core::environment::{Clock, RuntimeEnvironment, SystemClock};
//!
//! let clock = SystemClock;
//! let _now = clock.now();
//!
//! let env: RuntimeEnvironment = "production".parse().unwrap_or_default();
//! assert!(env.is_production());
//! ```

#![forbid(unsafe_code)]

/// Environment traits and values injected into components.
pub mod environment {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;
    use std::sync::Arc;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(Utc::now());
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time from the operating system.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    impl<C: Clock + ?Sized> Clock for Arc<C> {
        fn now(&self) -> DateTime<Utc> {
            (**self).now()
        }
    }

    impl<C: Clock + ?Sized> Clock for &C {
        fn now(&self) -> DateTime<Utc> {
            (**self).now()
        }
    }

    /// Deployment environment the process runs in.
    ///
    /// Settings that differ between production and everything else (password
    /// hash cost, the cookie `Secure` flag) are derived from this value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RuntimeEnvironment {
        /// Public deployment.
        Production,
        /// Local development (default).
        #[default]
        Development,
        /// Automated test runs.
        Test,
    }

    impl RuntimeEnvironment {
        /// Returns `true` for [`RuntimeEnvironment::Production`].
        #[must_use]
        pub const fn is_production(self) -> bool {
            matches!(self, Self::Production)
        }

        /// Lowercase name, as accepted by [`FromStr`].
        #[must_use]
        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Production => "production",
                Self::Development => "development",
                Self::Test => "test",
            }
        }
    }

    impl fmt::Display for RuntimeEnvironment {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Error returned when parsing an unknown environment name.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("unknown runtime environment: {0}")]
    pub struct UnknownEnvironment(pub String);

    impl FromStr for RuntimeEnvironment {
        type Err = UnknownEnvironment;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_ascii_lowercase().as_str() {
                "production" | "prod" => Ok(Self::Production),
                "development" | "dev" => Ok(Self::Development),
                "test" => Ok(Self::Test),
                other => Err(UnknownEnvironment(other.to_string())),
            }
        }
    }
}

pub use environment::{Clock, RuntimeEnvironment, SystemClock};
