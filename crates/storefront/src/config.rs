//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 8000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:8000`)
//! - `SESSION_EXPIRY_HOURS` - Idle lifetime of shopper storage (default: 168)
//! - `DEMO_USERNAME` - Email accepted by the demo login (default: test@example.com)
//! - `DEMO_PASSWORD` - Password accepted by the demo login (default: test123)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use demo_shop_core::{DemoCredentials, Email};
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_USERNAME: &str = "test@example.com";
const DEFAULT_PASSWORD: &str = "test123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Idle lifetime of a shopper's storage, in hours
    pub session_expiry_hours: i64,
    /// Credentials accepted by the demo login
    pub demo_credentials: DemoCredentials,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "8000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:8000");
        let session_expiry_hours = parse_env("SESSION_EXPIRY_HOURS", "168")?;

        let username = Email::parse(&get_env_or_default("DEMO_USERNAME", DEFAULT_USERNAME))
            .map_err(|e| ConfigError::InvalidEnvVar("DEMO_USERNAME".to_string(), e.to_string()))?;
        let password = SecretString::from(get_env_or_default("DEMO_PASSWORD", DEFAULT_PASSWORD));

        Ok(Self {
            host,
            port,
            base_url,
            session_expiry_hours,
            demo_credentials: DemoCredentials::new(username, password),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Defaults only, ignoring the environment.
    ///
    /// # Panics
    ///
    /// Never: the default username is a valid email.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn local() -> Self {
        let username = Email::parse(DEFAULT_USERNAME).expect("default username is a valid email");
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            session_expiry_hours: 168,
            demo_credentials: DemoCredentials::new(
                username,
                SecretString::from(DEFAULT_PASSWORD),
            ),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        let port: u16 = parse_value("STOREFRONT_PORT", "8080").unwrap();
        assert_eq!(port, 8080);

        let err = parse_value::<u16>("STOREFRONT_PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_parse_value_ip() {
        let host: IpAddr = parse_value("STOREFRONT_HOST", "0.0.0.0").unwrap();
        assert!(host.is_unspecified());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::local();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = StorefrontConfig::local();
        assert!(!config.is_secure());

        config.base_url = "https://shop.example.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug_output = format!("{:?}", StorefrontConfig::local());

        assert!(debug_output.contains("test@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("test123"));
    }
}
