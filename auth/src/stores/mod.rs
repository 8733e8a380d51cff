//! Storage implementations for the auth system.
//!
//! - **Session Store** (PostgreSQL): sessions with sliding expiration
//! - **User Repository** (PostgreSQL): accounts

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::{PostgresSessionStore, PostgresUserRepository};
