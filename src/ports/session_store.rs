//! SessionStore port - server-side sessions keyed by the cookie identifier.
//!
//! A session binds one browser context to the provider access token acquired
//! during login or checkout, so that the verify step after the provider's
//! approval redirect can act on the user's behalf.
//!
//! Implementations own per-key serialization of reads and writes. Callers
//! never mint session identifiers; they come from [`SessionStore::load`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::checkout::{AccessToken, CheckoutError};
use crate::domain::foundation::{SessionId, Timestamp};

/// Port for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session named by `id`.
    ///
    /// Returns a fresh, unsaved session with a new identifier when `id` is
    /// absent, unknown, or expired. Expired entries are evicted.
    async fn load(&self, id: Option<&SessionId>) -> Result<Session, SessionStoreError>;

    /// Persist the session until its expiry.
    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;
}

/// Session store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    /// The backing store could not be reached.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// A stored entry could not be decoded.
    #[error("corrupt session entry: {0}")]
    Corrupt(String),
}

impl From<SessionStoreError> for CheckoutError {
    fn from(err: SessionStoreError) -> Self {
        CheckoutError::session_store(err.to_string())
    }
}

/// Attribute set of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    access_token: Option<AccessToken>,
    created_at: Timestamp,
    expires_at: Timestamp,
    is_new: bool,
}

impl Session {
    /// A new session expiring `ttl_secs` from now.
    pub fn fresh(ttl_secs: u64) -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            access_token: None,
            created_at: now,
            expires_at: now.plus_secs(ttl_secs),
            is_new: true,
        }
    }

    /// Rebuilds a previously saved session.
    pub fn restore(
        id: SessionId,
        access_token: Option<AccessToken>,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            id,
            access_token,
            created_at,
            expires_at,
            is_new: false,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    pub fn set_access_token(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    /// Sets the expiry to `ttl_secs` after creation. The window is fixed;
    /// saving does not slide it.
    #[cfg(test)]
    pub(crate) fn set_expiry(&mut self, ttl_secs: u64) {
        self.expires_at = self.created_at.plus_secs(ttl_secs);
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// True when the session was minted by this load rather than read back.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        !self.expires_at.is_after(now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Timestamp::now())
    }

    /// Seconds left before expiry, zero once expired.
    pub fn remaining_secs(&self) -> u64 {
        Timestamp::now().secs_until(&self.expires_at)
    }
}
