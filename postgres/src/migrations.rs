//! Inspecting and applying the embedded migrations on demand.
//!
//! Backs `GET /api/v1/migrations` (dry run) and `POST /api/v1/migrations`.

use crate::{MIGRATOR, Result};
use serde::Serialize;
use sqlx::PgPool;
use sqlx::migrate::Migrate;
use std::collections::HashSet;

/// One embedded migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationInfo {
    /// Version prefix of the migration file.
    pub version: i64,
    /// Human-readable description derived from the file name.
    pub description: String,
}

/// Embedded migrations not yet recorded as applied.
///
/// Creates the bookkeeping table if it does not exist yet; no schema
/// migration is run.
///
/// # Errors
///
/// Returns [`crate::DatabaseError`] if the bookkeeping table cannot be read.
pub async fn pending_migrations(pool: &PgPool) -> Result<Vec<MigrationInfo>> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;

    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|migration| migration.version)
        .collect();

    Ok(MIGRATOR
        .iter()
        .filter(|migration| !applied.contains(&migration.version))
        .map(|migration| MigrationInfo {
            version: migration.version,
            description: migration.description.to_string(),
        })
        .collect())
}

/// Apply pending migrations and return the ones that were applied.
///
/// # Errors
///
/// Returns [`crate::DatabaseError::Migration`] if a migration fails.
pub async fn run_pending_migrations(pool: &PgPool) -> Result<Vec<MigrationInfo>> {
    let pending = pending_migrations(pool).await?;
    MIGRATOR.run(pool).await?;

    if !pending.is_empty() {
        tracing::info!(applied = pending.len(), "Applied pending migrations");
    }

    Ok(pending)
}
