//! Redis-backed session store for multi-instance deployments.
//!
//! Each session is one JSON value under `session:{id}`, written with
//! `SET .. EX` so Redis drops it when the fixed window closes.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::AccessToken;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{Session, SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "session:";

/// Stored form of a session.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    access_token: Option<String>,
    created_at: u64,
    expires_at: u64,
}

/// Redis session store.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisSessionStore {
    /// Create a store whose fresh sessions expire after `ttl_secs`.
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }

    fn key(id: &SessionId) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Option<&SessionId>) -> Result<Session, SessionStoreError> {
        let Some(id) = id else {
            return Ok(Session::fresh(self.ttl_secs));
        };

        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(Self::key(id)).await.map_err(unavailable)?;
        let Some(raw) = raw else {
            return Ok(Session::fresh(self.ttl_secs));
        };

        let stored: StoredSession =
            serde_json::from_str(&raw).map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;
        let session = Session::restore(
            *id,
            stored.access_token.map(AccessToken::new),
            Timestamp::from_unix_secs(stored.created_at),
            Timestamp::from_unix_secs(stored.expires_at),
        );

        if session.is_expired() {
            conn.del::<_, ()>(Self::key(id)).await.map_err(unavailable)?;
            tracing::debug!(session_id = %id, "Evicted expired session");
            return Ok(Session::fresh(self.ttl_secs));
        }

        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let remaining = session.remaining_secs();
        if remaining == 0 {
            // Already past its window; nothing worth storing.
            return Ok(());
        }

        let stored = StoredSession {
            access_token: session.access_token().map(|t| t.expose().to_string()),
            created_at: session.created_at().unix_secs(),
            expires_at: session.expires_at().unix_secs(),
        };
        let value =
            serde_json::to_string(&stored).map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;

        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(Self::key(session.id()))
            .arg(value)
            .arg("EX")
            .arg(remaining)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
