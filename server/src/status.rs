//! `GET /api/v1/status`: the database as this server sees it.

use crate::state::AppState;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use portico_postgres::{DatabaseStatus, fetch_status};
use portico_web::AppError;
use serde::Serialize;

/// Status response body.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// When this snapshot was taken.
    pub updated_at: DateTime<Utc>,
    /// Probed dependencies.
    pub dependencies: Dependencies,
}

/// Dependencies reported by the status endpoint.
#[derive(Debug, Serialize)]
pub struct Dependencies {
    /// The `PostgreSQL` server.
    pub database: DatabaseStatus,
}

/// Report database version, connection limit and open connections.
///
/// # Errors
///
/// Any probe failure is a 500 `InternalServerError`; the cause is logged.
pub async fn show(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    let updated_at = Utc::now();
    let database = fetch_status(&state.pool)
        .await
        .map_err(|e| AppError::internal().with_source(e.into()))?;

    Ok(Json(StatusResponse {
        updated_at,
        dependencies: Dependencies { database },
    }))
}
