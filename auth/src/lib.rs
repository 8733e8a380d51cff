//! # Portico Authentication
//!
//! Server-side sessions, accounts and the gate that ties a request to a
//! user.
//!
//! ## Features
//!
//! - **Opaque tokens**: 96 hex characters from a CSPRNG, stored server-side
//! - **Sliding expiration**: every successful lookup extends the session by
//!   [`constants::EXPIRATION_WINDOW`], atomically with the validity check
//! - **One rejection**: every unauthenticated case surfaces as
//!   [`AuthError::NoActiveSession`]
//! - **Testable**: stores take an injected clock; mocks behind `test-utils`
//!
//! ## Architecture
//!
//! ```text
//! cookie ──► AuthGate::authenticate ──► SessionStore::find_one_valid_by_token
//!                                   └─► UserRepository::find_by_id
//!        ◄── Authenticated { session, user }
//! handler ──► attach_session_cookie + apply_no_store
//! ```
//!
//! ## Crate features
//!
//! - `postgres`: [`stores::PostgresSessionStore`] and
//!   [`stores::PostgresUserRepository`]
//! - `axum`: HTTP handlers and [`router::auth_router`]
//! - `test-utils`: in-memory mocks

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod accounts;
pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod password;
pub mod providers;
pub mod state;
pub mod stores;
pub mod token;
pub mod utils;

// Mocks for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// HTTP handlers and router
#[cfg(feature = "axum")]
pub mod handlers;
#[cfg(feature = "axum")]
pub mod router;

// Re-export main types for convenience
pub use accounts::AccountService;
pub use config::{AuthSettings, PasswordConfig};
pub use error::{AuthError, Result};
pub use gate::{AuthGate, Authenticated};
pub use password::BcryptHasher;
pub use state::{Credentials, NewUser, Session, SessionId, User, UserId, UserPatch};

#[cfg(feature = "axum")]
pub use handlers::AuthContext;
#[cfg(feature = "axum")]
pub use router::auth_router;
