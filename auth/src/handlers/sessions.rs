//! `POST /api/v1/sessions`: log in with email and password.

use super::{AuthContext, invalid_body};
use crate::providers::{PasswordHasher, SessionStore, UserRepository};
use crate::state::{Credentials, Session};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portico_core::environment::Clock;
use portico_web::{AppError, attach_session_cookie};
use std::sync::Arc;

/// Check credentials, open a session and hand its token to the browser.
///
/// Responds 201 with the session record and a `Set-Cookie: session_id=...`
/// header.
///
/// # Errors
///
/// 401 `UnauthorizedError` if the email is unknown or the password is wrong
/// (same payload for both), 500 on storage failure.
pub async fn create<S, U, H, C>(
    State(ctx): State<Arc<AuthContext<S, U, H, C>>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, AppError>
where
    S: SessionStore,
    U: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    let Json(credentials) = body.map_err(|e| invalid_body(&e))?;

    let user = ctx
        .accounts
        .verify_credentials(&credentials.email, &credentials.password)
        .await?;
    let session: Session = ctx.gate.open_session(user.id).await?;

    let mut response = (StatusCode::CREATED, Json(&session)).into_response();
    attach_session_cookie(response.headers_mut(), &session.token, &ctx.cookies)?;

    Ok(response)
}
