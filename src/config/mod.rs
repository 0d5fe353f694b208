//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CHECKOUT_ATTESTOR`
//! prefix and `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use checkout_attestor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server binds {:?}", config.server.bind_addr());
//! ```

mod error;
mod paypal;
mod server;
mod session;
mod signing;

pub use error::{ConfigError, ValidationError};
pub use paypal::PayPalConfig;
pub use server::{Environment, ServerConfig};
pub use session::{RedisConfig, SessionBackend, SessionConfig};
pub use signing::SigningConfig;

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CHECKOUT_ATTESTOR";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PayPal client credentials and API endpoint
    pub paypal: PayPalConfig,

    /// Attestation signing key
    #[serde(default)]
    pub signing: SigningConfig,

    /// Session lifetime, cookie and backend
    #[serde(default)]
    pub session: SessionConfig,

    /// Redis connection, needed only for the Redis session backend
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `CHECKOUT_ATTESTOR__*` variables:
    ///
    /// - `CHECKOUT_ATTESTOR__SERVER__PORT=3001` -> `server.port = 3001`
    /// - `CHECKOUT_ATTESTOR__PAYPAL__CLIENT_ID=...` -> `paypal.client_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.paypal.validate(&self.server.environment)?;
        self.session.validate()?;
        if self.session.backend == SessionBackend::Redis {
            self.redis
                .as_ref()
                .ok_or(ValidationError::MissingRequired("REDIS__URL"))?
                .validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
