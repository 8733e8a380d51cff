//! Application state for the infrastructure endpoints.
//!
//! The auth routes carry their own state ([`portico_auth::AuthContext`]);
//! this covers what the status and migrations handlers need.

use sqlx::PgPool;

/// Shared state for the status and migrations handlers.
///
/// Cloned per request; the pool is reference-counted.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection pool
    pub pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
