//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Server host must be an IP address, got {0:?}")]
    InvalidHost(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid PayPal API base URL")]
    InvalidProviderUrl,

    #[error("PayPal API base URL must use HTTPS in production")]
    ProviderUrlMustBeHttps,

    #[error("Session lifetime must be between one second and one year")]
    InvalidSessionTtl,

    #[error("Session cookie name must not be empty")]
    InvalidCookieName,

    #[error("Session purge interval must be at least one second")]
    InvalidPurgeInterval,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,
}
