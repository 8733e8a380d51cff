//! `GET /api/v1/user`: the authenticated caller's own account.

use super::AuthContext;
use crate::providers::{PasswordHasher, SessionStore, UserRepository};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use portico_core::environment::Clock;
use portico_web::{AppError, SessionToken, apply_no_store, attach_session_cookie};
use std::sync::Arc;

/// Return the user owning the presented session.
///
/// The lookup renews the session; the response re-issues the cookie with a
/// fresh `Max-Age` and is marked non-cacheable.
///
/// # Errors
///
/// 401 `UnauthorizedError` if there is no valid session, 500 on storage
/// failure.
pub async fn current<S, U, H, C>(
    State(ctx): State<Arc<AuthContext<S, U, H, C>>>,
    SessionToken(token): SessionToken,
) -> Result<Response, AppError>
where
    S: SessionStore,
    U: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    let authenticated = ctx.gate.authenticate(token.as_deref()).await?;

    let mut response = Json(&authenticated.user).into_response();
    attach_session_cookie(
        response.headers_mut(),
        &authenticated.session.token,
        &ctx.cookies,
    )?;
    apply_no_store(response.headers_mut());

    Ok(response)
}
