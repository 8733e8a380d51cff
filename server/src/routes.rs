//! HTTP route configuration.
//!
//! Defines all routes and their handlers.

use crate::{migrations, state::AppState, status};
use axum::{Router, routing::get};
use portico_auth::stores::{PostgresSessionStore, PostgresUserRepository};
use portico_auth::{AuthContext, AuthSettings, BcryptHasher, auth_router};
use portico_core::environment::SystemClock;
use portico_web::handlers::{health_check, method_not_allowed};
use portico_web::{AppError, correlation_id_layer};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete application router.
///
/// # Routes
///
/// - `GET /health` - Liveness probe
/// - `GET /api/v1/status` - Database status
/// - `GET|POST /api/v1/migrations` - Pending migrations / apply them
/// - `/api/v1/users`, `/api/v1/sessions`, `/api/v1/user` - see
///   [`portico_auth::auth_router`]
///
/// Unknown paths answer 404 and unsupported methods 405, both with the
/// standard error payload.
pub fn build_router(pool: PgPool, settings: &AuthSettings) -> Router {
    let sessions = PostgresSessionStore::new(pool.clone()).with_window(settings.session_window);
    let users = PostgresUserRepository::new(pool.clone());
    let auth = Arc::new(AuthContext::new(
        sessions,
        users,
        BcryptHasher::new(settings.password),
        SystemClock,
        settings.cookie_config(),
    ));

    let infrastructure = Router::new()
        .route(
            "/status",
            get(status::show).fallback(method_not_allowed),
        )
        .route(
            "/migrations",
            get(migrations::list)
                .post(migrations::apply)
                .fallback(method_not_allowed),
        )
        .with_state(AppState::new(pool));

    let api = infrastructure.merge(auth_router(auth));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}

#[allow(clippy::unused_async)]
async fn route_not_found() -> AppError {
    AppError::not_found(
        "The requested route does not exist.",
        "Check the path of the request.",
    )
}
