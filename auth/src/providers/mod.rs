//! Provider traits for external dependencies.
//!
//! Each trait abstracts one collaborator so the gate and the account service
//! can run against PostgreSQL in production and in-memory mocks in tests.
//!
//! - [`SessionStore`]: session creation and validating lookup
//! - [`UserRepository`]: user persistence
//! - [`PasswordHasher`]: password digests

pub mod password;
pub mod session;
pub mod user;

pub use password::PasswordHasher;
pub use session::SessionStore;
pub use user::UserRepository;
