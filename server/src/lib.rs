//! # Portico Server
//!
//! Wires the Portico crates into one HTTP service: configuration from the
//! environment, the `PostgreSQL` pool, and the `/api/v1` router.
//!
//! The binary (`src/main.rs`) only handles process concerns: `.env`
//! loading, tracing setup, binding and shutdown.

pub mod config;
pub mod migrations;
pub mod routes;
pub mod state;
pub mod status;

pub use config::{Config, ConfigError, ServerConfig};
pub use routes::build_router;
pub use state::AppState;
