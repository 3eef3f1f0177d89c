//! Environment-provided server configuration.

use thiserror::Error;

/// Configuration errors raised at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// The variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Carrier proxy configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// OAuth2 client id for the carrier identity endpoint.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Carrier identity (token) endpoint URL.
    pub token_url: String,
    /// Carrier address-validation endpoint URL.
    pub validation_url: String,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if the carrier credentials or endpoint URLs are missing, or
    /// the port does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        let port_raw = lookup("ATRIUM_PORT").unwrap_or_else(|| "5000".to_string());
        let port = port_raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "ATRIUM_PORT",
            value: port_raw,
        })?;

        Ok(Self {
            client_id: require("CARRIER_CLIENT_ID")?,
            client_secret: require("CARRIER_CLIENT_SECRET")?,
            token_url: require("CARRIER_TOKEN_URL")?,
            validation_url: require("CARRIER_VALIDATION_URL")?,
            host: lookup("ATRIUM_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
        })
    }
}
