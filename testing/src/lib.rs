//! # Portico Testing
//!
//! Testing utilities shared by the Portico crates.
//!
//! This crate provides:
//! - Deterministic [`Clock`] implementations for session expiry tests
//! - A one-call tracing initialiser for noisy test debugging
//!
//! ## Example
//!
//! ```
//! use portico_testing::{test_clock, ManualClock};
//! use portico_core::environment::Clock;
//! use chrono::Duration;
//!
//! let clock = ManualClock::new(test_clock().now());
//! let before = clock.now();
//! clock.advance(Duration::days(31));
//! assert_eq!(clock.now() - before, Duration::days(31));
//! ```

use chrono::{DateTime, Utc};
use portico_core::environment::Clock;

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use portico_testing::mocks::FixedClock;
    /// use portico_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to.
    ///
    /// Clones share the same underlying instant, so a test can keep one
    /// handle while a store owns another and move time for both.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock starting at `time`.
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward (or backward, for negative durations).
        pub fn advance(&self, by: Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }

        /// Jump to an absolute instant.
        pub fn set(&self, to: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = to;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Clock that advances by a fixed step every time it is read.
    ///
    /// Useful for asserting strict monotonicity of timestamps without
    /// sleeping.
    #[derive(Debug, Clone)]
    pub struct SteppingClock {
        inner: ManualClock,
        step: Duration,
    }

    impl SteppingClock {
        /// Create a clock that returns `start`, then `start + step`, and so on.
        #[must_use]
        pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                inner: ManualClock::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let now = self.inner.now();
            self.inner.advance(self.step);
            now
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .map_or_else(|_| DateTime::<Utc>::default(), |t| t.with_timezone(&Utc)),
        )
    }
}

/// Test helpers and utilities.
pub mod helpers {
    /// Install a `tracing` subscriber that writes to the test harness.
    ///
    /// Honours `RUST_LOG`; safe to call from every test since repeated
    /// initialisation is ignored.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_tracing;
pub use mocks::{FixedClock, ManualClock, SteppingClock, test_clock};
