//! Custom Axum extractors.
//!
//! - `SessionToken`: the raw `session_id` cookie value, if any
//! - `CorrelationId`: the request correlation ID
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     State(ctx): State<Arc<AuthContext>>,
//!     SessionToken(token): SessionToken,
//! ) -> Result<Response, AppError> {
//!     let authenticated = ctx.gate.authenticate(token.as_deref()).await?;
//!     // ...
//! }
//! ```

use crate::cookies::{SESSION_COOKIE_NAME, read_cookie};
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Session token presented by the client.
///
/// Never rejects: an absent or empty cookie yields `SessionToken(None)` and
/// the decision is left to the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_cookie(&parts.headers, SESSION_COOKIE_NAME)))
    }
}

/// Correlation ID for request tracing.
///
/// Prefers the ID stored by the correlation middleware, then the
/// `X-Correlation-ID` header, and generates a new UUID v4 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::{Request, header};

    async fn session_token_of(req: Request<()>) -> SessionToken {
        let (mut parts, ()) = req.into_parts();
        SessionToken::from_request_parts(&mut parts, &())
            .await
            .expect("infallible")
    }

    #[tokio::test]
    async fn test_session_token_from_cookie() {
        let req = Request::builder()
            .header(header::COOKIE, "session_id=deadbeef")
            .body(())
            .expect("Valid request");

        assert_eq!(
            session_token_of(req).await,
            SessionToken(Some("deadbeef".to_string()))
        );
    }

    #[tokio::test]
    async fn test_session_token_absent() {
        let req = Request::builder()
            .header(header::COOKIE, "other=1")
            .body(())
            .expect("Valid request");

        assert_eq!(session_token_of(req).await, SessionToken(None));
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header(CORRELATION_ID_HEADER, uuid.to_string())
            .body(())
            .expect("Valid request");

        let (mut parts, ()) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let from_middleware = Uuid::new_v4();
        let req = Request::builder()
            .header(CORRELATION_ID_HEADER, Uuid::new_v4().to_string())
            .body(())
            .expect("Valid request");

        let (mut parts, ()) = req.into_parts();
        parts.extensions.insert(from_middleware);
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, from_middleware);
    }

    #[tokio::test]
    async fn test_correlation_id_generates_new() {
        let req = Request::builder().body(()).expect("Valid request");

        let (mut parts, ()) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_ne!(correlation_id.0, Uuid::nil());
    }
}
