//! PayPal REST API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// PayPal client credentials and endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalConfig {
    /// OAuth client id of the PayPal app
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret of the PayPal app
    pub client_secret: SecretString,

    /// REST API base URL (sandbox unless overridden)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Deadline for each provider call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PayPalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_sandbox(&self) -> bool {
        self.api_base_url.contains(".sandbox.")
    }

    /// Validate PayPal configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.client_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYPAL__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYPAL__CLIENT_SECRET"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        let url = self.api_base_url.as_str();
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ValidationError::InvalidProviderUrl);
        }
        if *environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::ProviderUrlMustBeHttps);
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api-m.sandbox.paypal.com".to_string()
}

fn default_timeout() -> u64 {
    15
}
