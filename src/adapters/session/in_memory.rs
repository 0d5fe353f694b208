//! In-memory session store for development and single-instance deployments.
//!
//! Sessions live in a `HashMap` behind a tokio `RwLock`; they are lost on
//! restart and are not shared between processes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{Session, SessionStore, SessionStoreError};

/// In-memory session store.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    ttl_secs: u64,
}

impl InMemorySessionStore {
    /// Create a store whose fresh sessions expire after `ttl_secs`.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl_secs,
        }
    }

    /// Number of stored sessions, expired ones included until evicted.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every expired session. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(&now));
        before - sessions.len()
    }

    /// Sweep expired sessions every `every`, so ids that are never presented
    /// again still get reclaimed.
    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick fires immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let removed = store.purge_expired().await;
                if removed > 0 {
                    let remaining = store.len().await;
                    tracing::debug!(removed, remaining, "Purged expired sessions");
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: Option<&SessionId>) -> Result<Session, SessionStoreError> {
        let Some(id) = id else {
            return Ok(Session::fresh(self.ttl_secs));
        };

        let now = Timestamp::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                None => return Ok(Session::fresh(self.ttl_secs)),
                Some(stored) if !stored.is_expired_at(&now) => {
                    return Ok(Session::restore(
                        *stored.id(),
                        stored.access_token().cloned(),
                        stored.created_at(),
                        stored.expires_at(),
                    ));
                }
                Some(_) => {}
            }
        }

        self.sessions.write().await.remove(id);
        tracing::debug!(session_id = %id, "Evicted expired session");
        Ok(Session::fresh(self.ttl_secs))
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(*session.id(), session.clone());
        Ok(())
    }
}
