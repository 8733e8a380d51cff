//! PostgreSQL session store.
//!
//! Sessions live in the `sessions` table. Validation and renewal are a single
//! conditional `UPDATE ... RETURNING`, so a lookup either renews an active
//! session atomically or matches nothing:
//!
//! ```sql
//! UPDATE sessions
//! SET updated_at = GREATEST(updated_at, $2), expires_at = GREATEST(expires_at, $3)
//! WHERE token = $1 AND expires_at > $2
//! RETURNING ...
//! ```
//!
//! Concurrent lookups of the same token each renew it. The row keeps the
//! latest renewal whatever order the writes commit in, so `expires_at`
//! never moves backward.

use super::database_error;
use crate::constants::EXPIRATION_WINDOW;
use crate::error::{AuthError, Result};
use crate::providers::SessionStore;
use crate::state::{Session, SessionId, UserId, storage_instant};
use crate::token::generate_token;
use chrono::Duration;
use portico_core::environment::{Clock, SystemClock};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const SESSION_COLUMNS: &str = "id, token, user_id, expires_at, created_at, updated_at";

/// PostgreSQL session store.
#[derive(Debug, Clone)]
pub struct PostgresSessionStore<C = SystemClock> {
    pool: PgPool,
    clock: C,
    window: Duration,
}

impl PostgresSessionStore<SystemClock> {
    /// Create a store reading time from the system clock.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, SystemClock)
    }
}

impl<C: Clock> PostgresSessionStore<C> {
    /// Create a store reading time from `clock`.
    #[must_use]
    pub const fn with_clock(pool: PgPool, clock: C) -> Self {
        Self {
            pool,
            clock,
            window: EXPIRATION_WINDOW,
        }
    }

    /// Override the expiration window.
    #[must_use]
    pub const fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

fn session_from_row(row: &PgRow) -> std::result::Result<Session, sqlx::Error> {
    Ok(Session {
        id: SessionId(row.try_get("id")?),
        token: row.try_get("token")?,
        user_id: UserId(row.try_get("user_id")?),
        expires_at: row.try_get("expires_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl<C: Clock> SessionStore for PostgresSessionStore<C> {
    async fn create(&self, user_id: UserId) -> Result<Session> {
        let now = storage_instant(self.clock.now());
        let expires_at = now + self.window;

        let row = sqlx::query(&format!(
            "INSERT INTO sessions (id, token, user_id, expires_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(SessionId::new().0)
        .bind(generate_token())
        .bind(user_id.0)
        .bind(expires_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("Failed to create session", &e))?;

        let session = session_from_row(&row)
            .map_err(|e| database_error("Failed to decode session", &e))?;

        tracing::debug!(session_id = %session.id, user_id = %user_id, "Session row inserted");

        Ok(session)
    }

    async fn find_one_valid_by_token(&self, token: &str) -> Result<Session> {
        let now = storage_instant(self.clock.now());
        let expires_at = now + self.window;

        let row = sqlx::query(&format!(
            "UPDATE sessions \
             SET updated_at = GREATEST(updated_at, $2), \
                 expires_at = GREATEST(expires_at, $3) \
             WHERE token = $1 AND expires_at > $2 \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(token)
        .bind(now)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to look up session", &e))?
        .ok_or(AuthError::SessionNotFound)?;

        session_from_row(&row).map_err(|e| database_error("Failed to decode session", &e))
    }
}
