//! Error types for web handlers.
//!
//! This module defines the error type that bridges domain errors and HTTP
//! responses. Every error leaves the server with the same JSON shape:
//!
//! ```json
//! {
//!   "name": "UnauthorizedError",
//!   "message": "User does not have an active session.",
//!   "action": "Check that this user is logged in and try again.",
//!   "status_code": 401
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Carries the public payload (`name`, `message`, `action`) and, for server
/// errors, the internal cause which is logged but never serialized.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<User>, AppError> {
///     let user = find_user(&username).await.map_err(|_| {
///         AppError::not_found(
///             "The user was not found in the system.",
///             "Check that the username is typed correctly.",
///         )
///     })?;
///     Ok(Json(user))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error class name (`UnauthorizedError`, `ValidationError`, ...)
    name: &'static str,
    /// Error message (user-facing)
    message: String,
    /// What the caller can do about it (user-facing)
    action: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(
        status: StatusCode,
        name: &'static str,
        message: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            status,
            name,
            message: message.into(),
            action: action.into(),
            source: None,
        }
    }

    /// Attach the internal cause of this error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 `ValidationError`.
    #[must_use]
    pub fn validation(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "ValidationError", message, action)
    }

    /// Create a 401 `UnauthorizedError`.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UnauthorizedError", message, action)
    }

    /// Create a 404 `NotFoundError`.
    #[must_use]
    pub fn not_found(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFoundError", message, action)
    }

    /// Create a 405 `MethodNotAllowedError`.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "MethodNotAllowedError",
            "Method not allowed for this endpoint.",
            "Check that the HTTP method sent is valid for this endpoint.",
        )
    }

    /// Create a 500 `InternalServerError`.
    ///
    /// The public message is fixed; pass the real cause via
    /// [`AppError::with_source`].
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalServerError",
            "An unexpected internal error occurred.",
            "Contact support.",
        )
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Error class name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Public JSON body for this error.
    #[must_use]
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            name: self.name.to_string(),
            message: self.message.clone(),
            action: self.action.clone(),
            status_code: self.status.as_u16(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.name, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct ErrorPayload {
    /// Error class name.
    pub name: String,
    /// Human-readable error message.
    pub message: String,
    /// Suggested action.
    pub action: String,
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    name = self.name,
                    error = %source,
                    cause = ?source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    name = self.name,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        (self.status, Json(self.payload())).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal().with_source(err)
    }
}
