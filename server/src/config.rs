//! Configuration management for the Portico server.
//!
//! Loads configuration from environment variables. A `.env` file is read by
//! the binary before [`Config::from_env`] is called.
//!
//! # Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | built from `POSTGRES_*` |
//! | `POSTGRES_HOST` / `POSTGRES_PORT` | `localhost` / `5432` |
//! | `POSTGRES_USER` / `POSTGRES_PASSWORD` | `postgres` / `postgres` |
//! | `POSTGRES_DB` | `portico` |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `DATABASE_MIN_CONNECTIONS` | `1` |
//! | `DATABASE_CONNECT_TIMEOUT` | `30` (seconds) |
//! | `DATABASE_IDLE_TIMEOUT` | `600` (seconds) |
//! | `HOST` / `PORT` | `0.0.0.0` / `3000` |
//! | `APP_ENV` (or `NODE_ENV`) | `development` |

use portico_auth::AuthSettings;
use portico_core::environment::{RuntimeEnvironment, UnknownEnvironment};
use portico_postgres::DatabaseConfig;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// The raw value
        value: String,
    },

    /// `APP_ENV`/`NODE_ENV` named an unknown environment.
    #[error(transparent)]
    Environment(#[from] UnknownEnvironment),

    /// `HOST` and `PORT` do not form a socket address.
    #[error("invalid listen address {0:?}")]
    ListenAddress(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `PostgreSQL` pool configuration
    pub database: DatabaseConfig,
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Deployment environment
    pub environment: RuntimeEnvironment,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl ServerConfig {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ListenAddress`] if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigError::ListenAddress(address))
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = DatabaseConfig::default();

        let url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map_or_else(|| url_from_parts(&lookup), Ok)?;

        let database = DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout: parse_or(&lookup, "DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout)?,
            idle_timeout: parse_or(&lookup, "DATABASE_IDLE_TIMEOUT", defaults.idle_timeout)?,
        };

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
        };

        let environment = match lookup("APP_ENV").or_else(|| lookup("NODE_ENV")) {
            Some(name) => name.parse()?,
            None => RuntimeEnvironment::default(),
        };

        Ok(Self {
            database,
            server,
            environment,
        })
    }

    /// Session, cookie and password settings for this environment.
    #[must_use]
    pub const fn auth_settings(&self) -> AuthSettings {
        AuthSettings::for_environment(self.environment)
    }
}

fn url_from_parts(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
    let port: u16 = parse_or(lookup, "POSTGRES_PORT", 5432)?;

    Ok(format!(
        "postgres://{}:{}@{}:{port}/{}",
        var("POSTGRES_USER", "postgres"),
        var("POSTGRES_PASSWORD", "postgres"),
        var("POSTGRES_HOST", "localhost"),
        var("POSTGRES_DB", "portico"),
    ))
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        None => Ok(default),
    }
}
