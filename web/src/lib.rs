//! Axum integration for Portico.
//!
//! This crate holds the HTTP plumbing shared by the domain routers:
//!
//! - [`AppError`]: the `{ name, message, action, status_code }` error payload
//! - [`cookies`]: session cookie issuance and parsing, `Cache-Control` helpers
//! - [`extractors`]: `SessionToken` and `CorrelationId`
//! - [`middleware`]: correlation ID layer
//! - [`handlers`]: liveness and the JSON 405 fallback
//!
//! It knows nothing about users or sessions as domain objects; those live in
//! `portico-auth`, which depends on this crate.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cookies;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

pub use cookies::{
    CookieConfig, NO_STORE_CACHE_CONTROL, SESSION_COOKIE_NAME, apply_no_store,
    attach_session_cookie, read_cookie,
};
pub use error::{AppError, ErrorPayload};
pub use extractors::{CorrelationId, SessionToken};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
