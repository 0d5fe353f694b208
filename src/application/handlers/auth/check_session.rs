//! CheckSessionHandler - query for a live, token-bearing session.

use std::sync::Arc;

use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Query whether the caller's session is alive.
#[derive(Debug, Clone)]
pub struct CheckSessionQuery {
    pub session_id: Option<SessionId>,
}

/// Outcome of a session check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Alive,
    ExpiredOrInvalid,
}

impl SessionStatus {
    pub fn is_alive(&self) -> bool {
        matches!(self, SessionStatus::Alive)
    }
}

/// Handler for session checks.
///
/// A session is alive when the cookie names a stored, unexpired session that
/// holds an access token. Never creates or saves a session.
pub struct CheckSessionHandler {
    sessions: Arc<dyn SessionStore>,
}

impl CheckSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: CheckSessionQuery) -> Result<SessionStatus, CheckoutError> {
        let Some(id) = query.session_id else {
            return Ok(SessionStatus::ExpiredOrInvalid);
        };

        let session = self.sessions.load(Some(&id)).await?;
        if !session.is_new() && session.access_token().is_some() {
            Ok(SessionStatus::Alive)
        } else {
            Ok(SessionStatus::ExpiredOrInvalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::InMemorySessionStore;
    use crate::domain::checkout::AccessToken;
    use crate::ports::{Session, SessionStoreError};
    use async_trait::async_trait;

    struct UnavailableSessionStore;

    #[async_trait]
    impl SessionStore for UnavailableSessionStore {
        async fn load(&self, _id: Option<&SessionId>) -> Result<Session, SessionStoreError> {
            Err(SessionStoreError::Unavailable("timeout".to_string()))
        }

        async fn save(&self, _session: &Session) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::Unavailable("timeout".to_string()))
        }
    }

    fn query(id: Option<SessionId>) -> CheckSessionQuery {
        CheckSessionQuery { session_id: id }
    }

    #[tokio::test]
    async fn no_cookie_is_not_alive() {
        let handler = CheckSessionHandler::new(Arc::new(InMemorySessionStore::new(60)));
        let status = handler.handle(query(None)).await.unwrap();
        assert_eq!(status, SessionStatus::ExpiredOrInvalid);
    }

    #[tokio::test]
    async fn unknown_session_is_not_alive_and_not_created() {
        let store = Arc::new(InMemorySessionStore::new(60));
        let handler = CheckSessionHandler::new(store.clone());

        let status = handler.handle(query(Some(SessionId::new()))).await.unwrap();

        assert!(!status.is_alive());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn session_without_token_is_not_alive() {
        let store = Arc::new(InMemorySessionStore::new(60));
        let session = store.load(None).await.unwrap();
        store.save(&session).await.unwrap();
        let handler = CheckSessionHandler::new(store);

        let status = handler.handle(query(Some(*session.id()))).await.unwrap();
        assert!(!status.is_alive());
    }

    #[tokio::test]
    async fn session_with_token_is_alive() {
        let store = Arc::new(InMemorySessionStore::new(60));
        let mut session = store.load(None).await.unwrap();
        session.set_access_token(AccessToken::new("T1"));
        store.save(&session).await.unwrap();
        let handler = CheckSessionHandler::new(store);

        let status = handler.handle(query(Some(*session.id()))).await.unwrap();
        assert!(status.is_alive());
    }

    #[tokio::test]
    async fn expired_session_is_not_alive() {
        let store = Arc::new(InMemorySessionStore::new(0));
        let mut session = store.load(None).await.unwrap();
        session.set_access_token(AccessToken::new("T1"));
        store.save(&session).await.unwrap();
        let handler = CheckSessionHandler::new(store);

        let status = handler.handle(query(Some(*session.id()))).await.unwrap();
        assert!(!status.is_alive());
    }

    #[tokio::test]
    async fn store_failure_is_a_session_error() {
        let handler = CheckSessionHandler::new(Arc::new(UnavailableSessionStore));
        let err = handler.handle(query(Some(SessionId::new()))).await.unwrap_err();
        assert_eq!(err.code(), "SESSION_ERROR");
    }
}
