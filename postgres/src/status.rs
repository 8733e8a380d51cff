//! Database status probe.

use crate::{DatabaseError, Result};
use serde::Serialize;
use sqlx::{PgPool, Row};

/// Snapshot of the database server reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStatus {
    /// `server_version` as reported by `PostgreSQL` (e.g. `"16.2"`).
    pub version: String,
    /// Configured `max_connections`.
    pub max_connections: i32,
    /// Connections currently open against this database.
    pub opened_connections: i32,
}

/// Query the server version, connection limit and open connections.
///
/// # Errors
///
/// Returns [`DatabaseError::Query`] if any of the probes fail, or
/// [`DatabaseError::UnexpectedValue`] if `max_connections` is not numeric.
pub async fn fetch_status(pool: &PgPool) -> Result<DatabaseStatus> {
    let version: String = sqlx::query("SHOW server_version")
        .fetch_one(pool)
        .await?
        .try_get(0)?;

    let max_connections_raw: String = sqlx::query("SHOW max_connections")
        .fetch_one(pool)
        .await?
        .try_get(0)?;
    let max_connections = max_connections_raw
        .trim()
        .parse::<i32>()
        .map_err(|_| DatabaseError::UnexpectedValue {
            field: "max_connections",
            value: max_connections_raw.clone(),
        })?;

    let opened_connections: i32 = sqlx::query(
        r"
        SELECT count(*)::int AS opened
        FROM pg_stat_activity
        WHERE datname = current_database()
        ",
    )
    .fetch_one(pool)
    .await?
    .try_get("opened")?;

    Ok(DatabaseStatus {
        version,
        max_connections,
        opened_connections,
    })
}
