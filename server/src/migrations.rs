//! `/api/v1/migrations`: list pending migrations or apply them.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use portico_postgres::{MigrationInfo, pending_migrations, run_pending_migrations};
use portico_web::AppError;

/// `GET`: dry run. Lists migrations that would be applied.
///
/// # Errors
///
/// Database failures are a 500 `InternalServerError`.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MigrationInfo>>, AppError> {
    let pending = pending_migrations(&state.pool)
        .await
        .map_err(|e| AppError::internal().with_source(e.into()))?;
    Ok(Json(pending))
}

/// `POST`: apply pending migrations.
///
/// Answers 201 with the applied migrations, or 200 with an empty list when
/// the schema was already current.
///
/// # Errors
///
/// Database or migration failures are a 500 `InternalServerError`.
pub async fn apply(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<MigrationInfo>>), AppError> {
    let applied = run_pending_migrations(&state.pool)
        .await
        .map_err(|e| AppError::internal().with_source(e.into()))?;

    let status = if applied.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(applied)))
}
