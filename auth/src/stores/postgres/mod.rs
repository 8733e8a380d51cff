//! PostgreSQL storage implementations.
//!
//! Both stores expect the schema applied by `portico_postgres::migrate`.

pub mod session;
pub mod user;

pub use session::PostgresSessionStore;
pub use user::PostgresUserRepository;

use crate::error::AuthError;

/// Wrap a database failure as [`AuthError::DatabaseError`].
fn database_error(context: &str, e: &sqlx::Error) -> AuthError {
    tracing::debug!(error = %e, "{context}");
    AuthError::DatabaseError(format!("{context}: {e}"))
}
