//! Mock provider implementations for testing.
//!
//! In-memory implementations of every provider trait, for unit and
//! integration tests. Enabled by the `test-utils` feature.

pub mod password;
pub mod session;
pub mod user;

pub use password::MockPasswordHasher;
pub use session::MockSessionStore;
pub use user::MockUserRepository;
