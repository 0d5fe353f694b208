//! Session binding configuration: lifetime, cookie and storage backend

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on the session lifetime (one year).
const MAX_TTL_SECS: u64 = 365 * 86_400;

/// Where sessions are kept.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    Memory,
    Redis,
}

/// Session lifetime and cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Fixed session lifetime in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the cookie `Secure`; disable only for local plain-HTTP development
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,

    #[serde(default)]
    pub backend: SessionBackend,

    /// How often the in-memory backend sweeps out expired sessions
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 || self.ttl_secs > MAX_TTL_SECS {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.cookie_name.trim().is_empty() {
            return Err(ValidationError::InvalidCookieName);
        }
        if self.purge_interval_secs == 0 {
            return Err(ValidationError::InvalidPurgeInterval);
        }
        Ok(())
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: default_cookie_secure(),
            backend: SessionBackend::default(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    86_400
}

fn default_purge_interval() -> u64 {
    300
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_cookie_secure() -> bool {
    true
}

/// Connection for the Redis session backend
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// `redis://` or `rediss://` URL
    #[serde(default)]
    pub url: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl RedisConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !(url.starts_with("redis://") || url.starts_with("rediss://")) {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_connect_timeout() -> u64 {
    5
}
