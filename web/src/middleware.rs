//! Correlation ID middleware.
//!
//! Every request gets an ID, taken from `X-Correlation-ID` when the client
//! sends a valid UUID and generated otherwise. The ID is stored in the
//! request extensions, recorded on an `http_request` span wrapping the
//! handler, and echoed back in the response header.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/api/v1/user", get(current_user))
//!     .layer(correlation_id_layer());
//! ```

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Request and response header carrying the correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Tower layer tagging each request with a correlation ID.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// See [`correlation_id_layer`].
#[derive(Clone, Copy, Debug)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdService { inner }
    }
}

/// Service produced by [`CorrelationIdLayer`].
#[derive(Clone, Debug)]
pub struct CorrelationIdService<S> {
    inner: S,
}

/// The client's ID if it is a UUID, a fresh one otherwise.
fn resolve(headers: &HeaderMap) -> Uuid {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S> Service<Request> for CorrelationIdService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<Response, S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        let id = resolve(request.headers());
        request.extensions_mut().insert(id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %id,
            method = %request.method(),
            path = %request.uri().path(),
        );
        let pending = self.inner.call(request).instrument(span);

        Box::pin(async move {
            let mut response = pending.await?;
            // A hyphenated UUID is always a valid header value.
            if let Ok(value) = HeaderValue::from_str(&id.hyphenated().to_string()) {
                response.headers_mut().insert(CORRELATION_ID_HEADER, value);
            }
            Ok(response)
        })
    }
}
