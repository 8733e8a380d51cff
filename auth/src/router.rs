//! Authentication router composition.
//!
//! Composes the account and session handlers into a single Axum router.

use crate::handlers::{AuthContext, sessions, user, users};
use crate::providers::{PasswordHasher, SessionStore, UserRepository};
use axum::{
    Router,
    routing::{get, post},
};
use portico_core::environment::Clock;
use portico_web::handlers::method_not_allowed;
use std::sync::Arc;

/// Create the router with all account and session endpoints.
///
/// # Routes
///
/// ## Accounts
/// - `POST /users` - Register
/// - `GET /users/:username` - Public profile
/// - `PATCH /users/:username` - Update profile
///
/// ## Sessions
/// - `POST /sessions` - Log in, sets the `session_id` cookie
/// - `GET /user` - Current user, renews the session
///
/// Any other method on these paths answers 405 with the standard error
/// payload.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = Arc::new(AuthContext::new(sessions, users, hasher, SystemClock, cookies));
///
/// let app = Router::new()
///     .nest("/api/v1", auth_router(ctx))
///     .layer(TraceLayer::new_for_http());
/// ```
pub fn auth_router<S, U, H, C>(ctx: Arc<AuthContext<S, U, H, C>>) -> Router
where
    S: SessionStore + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
    C: Clock + 'static,
{
    Router::new()
        // Account routes
        .route(
            "/users",
            post(users::create::<S, U, H, C>).fallback(method_not_allowed),
        )
        .route(
            "/users/:username",
            get(users::show::<S, U, H, C>)
                .patch(users::update::<S, U, H, C>)
                .fallback(method_not_allowed),
        )
        // Session routes
        .route(
            "/sessions",
            post(sessions::create::<S, U, H, C>).fallback(method_not_allowed),
        )
        .route(
            "/user",
            get(user::current::<S, U, H, C>).fallback(method_not_allowed),
        )
        .with_state(ctx)
}
