//! Liveness and method fallback handlers.

use crate::error::AppError;
use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Liveness probe. Does not touch the database.
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Fallback for routes hit with an unsupported method.
///
/// Install it with `MethodRouter::fallback` so the 405 carries the standard
/// error payload instead of an empty body.
#[allow(clippy::unused_async)]
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
