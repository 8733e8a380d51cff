//! `/api/v1/users` handlers: registration, profile lookup and update.

use super::{AuthContext, invalid_body};
use crate::providers::{PasswordHasher, SessionStore, UserRepository};
use crate::state::{NewUser, User, UserPatch};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use portico_core::environment::Clock;
use portico_web::AppError;
use std::sync::Arc;

/// Register a user.
///
/// ```text
/// POST /api/v1/users
/// { "username": "...", "email": "...", "password": "..." }
/// ```
///
/// # Errors
///
/// 400 for malformed input or a taken username/email, 500 on storage failure.
pub async fn create<S, U, H, C>(
    State(ctx): State<Arc<AuthContext<S, U, H, C>>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError>
where
    S: SessionStore,
    U: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    let Json(new_user) = body.map_err(|e| invalid_body(&e))?;
    let user = ctx.accounts.register(new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Public profile lookup.
///
/// ```text
/// GET /api/v1/users/:username
/// ```
///
/// # Errors
///
/// 404 if no user has this username (case-insensitive).
pub async fn show<S, U, H, C>(
    State(ctx): State<Arc<AuthContext<S, U, H, C>>>,
    Path(username): Path<String>,
) -> Result<Json<User>, AppError>
where
    S: SessionStore,
    U: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    Ok(Json(ctx.accounts.find_by_username(&username).await?))
}

/// Partial profile update.
///
/// ```text
/// PATCH /api/v1/users/:username
/// { "username"?: "...", "email"?: "...", "password"?: "..." }
/// ```
///
/// # Errors
///
/// 404 if the user does not exist, 400 for malformed input or a conflict.
pub async fn update<S, U, H, C>(
    State(ctx): State<Arc<AuthContext<S, U, H, C>>>,
    Path(username): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>, AppError>
where
    S: SessionStore,
    U: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    let Json(patch) = body.map_err(|e| invalid_body(&e))?;
    Ok(Json(ctx.accounts.update(&username, patch).await?))
}
