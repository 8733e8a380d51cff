//! HTTP behaviour of the account and session endpoints.
//!
//! Drives the router with `tower::ServiceExt::oneshot` over in-memory
//! stores.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use chrono::Duration;
use portico_auth::constants::EXPIRATION_WINDOW;
use portico_auth::mocks::{MockPasswordHasher, MockSessionStore, MockUserRepository};
use portico_auth::{AuthContext, AuthSettings, auth_router};
use portico_core::environment::{Clock, RuntimeEnvironment};
use portico_testing::init_tracing;
use portico_testing::mocks::{ManualClock, test_clock};
use portico_web::ErrorPayload;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    clock: ManualClock,
    sessions: MockSessionStore<ManualClock>,
}

fn app_for(environment: RuntimeEnvironment) -> TestApp {
    init_tracing();
    let clock = ManualClock::new(test_clock().now());
    let users = MockUserRepository::new();
    let sessions = MockSessionStore::new(clock.clone()).with_users(users.clone());
    let settings = AuthSettings::for_environment(environment);

    let ctx = Arc::new(AuthContext::new(
        sessions.clone(),
        users,
        MockPasswordHasher::new(),
        clock.clone(),
        settings.cookie_config(),
    ));

    TestApp {
        router: Router::new().nest("/api/v1", auth_router(ctx)),
        clock,
        sessions,
    }
}

fn app() -> TestApp {
    app_for(RuntimeEnvironment::Test)
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post_json(&self, uri: &str, body: &Value) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .post_json(
                "/api/v1/users",
                &json!({ "username": username, "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    /// Log in and return the session token from `Set-Cookie`.
    async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json("/api/v1/sessions", &json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        session_cookie_value(&response).unwrap()
    }

    async fn get_user(&self, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri("/api/v1/user");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn error_payload(response: Response<Body>) -> ErrorPayload {
    serde_json::from_value(body_json(response).await).unwrap()
}

fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

fn session_cookie_value(response: &Response<Body>) -> Option<String> {
    let raw = set_cookie(response)?;
    let pair = raw.split(';').next()?;
    pair.strip_prefix("session_id=").map(str::to_string)
}

// ═══════════════════════════════════════════════════════════════════════
// Registration and profiles
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn register_returns_created_user() {
    let app = app();

    let user = app.register("maria", "maria@example.com", "secret123").await;

    assert_eq!(user["username"], "maria");
    assert_eq!(user["email"], "maria@example.com");
    assert_ne!(user["password"], "secret123");
    assert!(uuid::Uuid::parse_str(user["id"].as_str().unwrap()).is_ok());
    assert_eq!(user["created_at"], user["updated_at"]);
}

#[tokio::test]
async fn register_duplicate_email_is_validation_error() {
    let app = app();
    app.register("maria", "maria@example.com", "secret123").await;

    let response = app
        .post_json(
            "/api/v1/users",
            &json!({ "username": "other", "email": "MARIA@example.com", "password": "x" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = error_payload(response).await;
    assert_eq!(payload.name, "ValidationError");
    assert_eq!(payload.message, "The email provided is already in use.");
    assert_eq!(payload.action, "Use another email to complete this operation.");
    assert_eq!(payload.status_code, 400);
}

#[tokio::test]
async fn register_duplicate_username_is_validation_error() {
    let app = app();
    app.register("maria", "maria@example.com", "secret123").await;

    let response = app
        .post_json(
            "/api/v1/users",
            &json!({ "username": "Maria", "email": "other@example.com", "password": "x" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_payload(response).await.message,
        "The username provided is already in use."
    );
}

#[tokio::test]
async fn malformed_body_is_validation_error() {
    let app = app();

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_payload(response).await.name, "ValidationError");
}

#[tokio::test]
async fn profile_lookup_ignores_case() {
    let app = app();
    app.register("Maria", "maria@example.com", "secret123").await;

    let response = app
        .send(Request::builder().uri("/api/v1/users/mARIA").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "Maria");
}

#[tokio::test]
async fn unknown_profile_is_not_found() {
    let app = app();

    let response = app
        .send(Request::builder().uri("/api/v1/users/ghost").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = error_payload(response).await;
    assert_eq!(payload.name, "NotFoundError");
    assert_eq!(payload.message, "The user was not found in the system.");
    assert_eq!(payload.action, "Check that the username is typed correctly.");
}

#[tokio::test]
async fn patch_updates_profile_and_advances_updated_at() {
    let app = app();
    let created = app.register("maria", "maria@example.com", "secret123").await;

    app.clock.advance(Duration::seconds(30));
    let response = app
        .send(
            Request::builder()
                .method("PATCH")
                .uri("/api/v1/users/maria")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "username": "maria2" }).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["username"], "maria2");
    assert_eq!(updated["email"], "maria@example.com");
    assert_ne!(updated["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn patch_to_taken_username_is_rejected() {
    let app = app();
    app.register("maria", "maria@example.com", "secret123").await;
    app.register("joao", "joao@example.com", "secret123").await;

    let response = app
        .send(
            Request::builder()
                .method("PATCH")
                .uri("/api/v1/users/joao")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "username": "MARIA" }).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ═══════════════════════════════════════════════════════════════════════
// Sessions
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn login_sets_session_cookie() {
    let app = app();
    let user = app.register("maria", "maria@example.com", "secret123").await;

    let response = app
        .post_json(
            "/api/v1/sessions",
            &json!({ "email": "maria@example.com", "password": "secret123" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=2592000"));
    assert!(!cookie.contains("Secure"));

    let token = session_cookie_value(&response).unwrap();
    let session = body_json(response).await;
    assert_eq!(session["token"], token.as_str());
    assert_eq!(session["user_id"], user["id"]);
    assert_eq!(token.len(), 96);
}

#[tokio::test]
async fn production_cookie_is_secure() {
    let app = app_for(RuntimeEnvironment::Production);
    app.register("maria", "maria@example.com", "secret123").await;

    let response = app
        .post_json(
            "/api/v1/sessions",
            &json!({ "email": "maria@example.com", "password": "secret123" }),
        )
        .await;

    assert!(set_cookie(&response).unwrap().contains("Secure"));
}

#[tokio::test]
async fn bad_credentials_share_one_payload() {
    let app = app();
    app.register("maria", "maria@example.com", "secret123").await;

    let wrong_email = app
        .post_json(
            "/api/v1/sessions",
            &json!({ "email": "nobody@example.com", "password": "secret123" }),
        )
        .await;
    let wrong_password = app
        .post_json(
            "/api/v1/sessions",
            &json!({ "email": "maria@example.com", "password": "wrong" }),
        )
        .await;

    assert_eq!(wrong_email.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&wrong_email).is_none());

    let a = error_payload(wrong_email).await;
    let b = error_payload(wrong_password).await;
    assert_eq!(a, b);
    assert_eq!(a.message, "Authentication data does not match.");
    assert_eq!(a.action, "Check that the email and password are correct.");
}

#[tokio::test]
async fn current_user_renews_session_and_cookie() {
    let app = app();
    let user = app.register("maria", "maria@example.com", "secret123").await;
    let token = app.login("maria@example.com", "secret123").await;
    let created = app.sessions.peek(&token).unwrap().unwrap();

    app.clock.advance(EXPIRATION_WINDOW / 2);
    let response = app.get_user(Some(&format!("session_id={token}"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store, no-cache, max-age=0, must-revalidate"
    );
    assert_eq!(session_cookie_value(&response).as_deref(), Some(token.as_str()));
    assert!(set_cookie(&response).unwrap().contains("Max-Age=2592000"));
    assert_eq!(body_json(response).await, user);

    let renewed = app.sessions.peek(&token).unwrap().unwrap();
    assert_eq!(renewed.updated_at, created.updated_at + EXPIRATION_WINDOW / 2);
    assert_eq!(renewed.expires_at, renewed.updated_at + EXPIRATION_WINDOW);
}

#[tokio::test]
async fn current_user_without_valid_session_is_unauthorized() {
    let app = app();
    app.register("maria", "maria@example.com", "secret123").await;
    let token = app.login("maria@example.com", "secret123").await;
    app.clock.advance(EXPIRATION_WINDOW + Duration::seconds(1));

    let expired = app.get_user(Some(&format!("session_id={token}"))).await;
    let unknown = app
        .get_user(Some(&format!("session_id={}", "0".repeat(96))))
        .await;
    let missing = app.get_user(None).await;

    for response in [&expired, &unknown, &missing] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(response).is_none());
    }

    let expected = ErrorPayload {
        name: "UnauthorizedError".to_string(),
        message: "User does not have an active session.".to_string(),
        action: "Check that this user is logged in and try again.".to_string(),
        status_code: 401,
    };
    assert_eq!(error_payload(expired).await, expected);
    assert_eq!(error_payload(unknown).await, expected);
    assert_eq!(error_payload(missing).await, expected);
}

// ═══════════════════════════════════════════════════════════════════════
// Methods
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn unsupported_methods_return_405_payload() {
    let app = app();

    for (method, uri) in [
        ("DELETE", "/api/v1/users"),
        ("PUT", "/api/v1/users/maria"),
        ("GET", "/api/v1/sessions"),
        ("POST", "/api/v1/user"),
    ] {
        let response = app
            .send(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        let payload = error_payload(response).await;
        assert_eq!(payload.name, "MethodNotAllowedError");
        assert_eq!(payload.status_code, 405);
    }
}
