//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `CART_HOST` - Bind address (default: 127.0.0.1)
//! - `CART_PORT` - Listen port (default: 3000)
//! - `CART_DELIVERY_FEE` - Flat delivery fee applied to every order (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g., production)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use cart_core::Money;

/// Default flat delivery fee when `CART_DELIVERY_FEE` is not set.
const DEFAULT_DELIVERY_FEE: i64 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Flat delivery fee applied to every order
    pub delivery_fee: Money,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = require_env("DATABASE_URL")?.into();

        let host = optional_env("CART_HOST")
            .map_or(Ok(IpAddr::from([127, 0, 0, 1])), |v| {
                v.parse()
                    .map_err(|e| ConfigError::InvalidEnvVar("CART_HOST".to_owned(), format!("{e}")))
            })?;

        let port = optional_env("CART_PORT").map_or(Ok(3000), |v| {
            v.parse()
                .map_err(|e| ConfigError::InvalidEnvVar("CART_PORT".to_owned(), format!("{e}")))
        })?;

        let delivery_fee = parse_delivery_fee(optional_env("CART_DELIVERY_FEE"))?;

        Ok(Self {
            database_url,
            host,
            port,
            delivery_fee,
            sentry_dsn: optional_env("SENTRY_DSN"),
            sentry_environment: optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_delivery_fee(raw: Option<String>) -> Result<Money, ConfigError> {
    let Some(raw) = raw else {
        return Money::new(DEFAULT_DELIVERY_FEE)
            .map_err(|e| ConfigError::InvalidEnvVar("CART_DELIVERY_FEE".to_owned(), e.to_string()));
    };

    let amount: i64 = raw
        .parse()
        .map_err(|e| ConfigError::InvalidEnvVar("CART_DELIVERY_FEE".to_owned(), format!("{e}")))?;

    Money::new(amount)
        .map_err(|e| ConfigError::InvalidEnvVar("CART_DELIVERY_FEE".to_owned(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_fee_defaults_when_unset() {
        let fee = parse_delivery_fee(None).expect("default is valid");
        assert_eq!(fee.amount(), DEFAULT_DELIVERY_FEE);
    }

    #[test]
    fn delivery_fee_parses_from_string() {
        let fee = parse_delivery_fee(Some("2500".to_owned())).expect("valid");
        assert_eq!(fee.amount(), 2500);
    }

    #[test]
    fn delivery_fee_rejects_garbage_and_negatives() {
        assert!(parse_delivery_fee(Some("free".to_owned())).is_err());
        assert!(parse_delivery_fee(Some("-10".to_owned())).is_err());
    }
}
