//! Binding an acquired access token to the caller's session.

use crate::domain::checkout::{AccessToken, CheckoutError, CheckoutStage};
use crate::domain::foundation::SessionId;
use crate::ports::{Session, SessionStore};

/// Loads the caller's session (or a fresh one), stores `token` in it and
/// persists it. The returned session is what the cookie must name.
pub(crate) async fn bind_access_token(
    sessions: &dyn SessionStore,
    session_id: Option<&SessionId>,
    token: AccessToken,
) -> Result<Session, CheckoutError> {
    let mut session = sessions.load(session_id).await?;
    session.set_access_token(token);
    sessions.save(&session).await.map_err(|e| {
        tracing::error!(session_id = %session.id(), error = %e, "Failed to save session");
        CheckoutError::from(e)
    })?;
    tracing::debug!(session_id = %session.id(), new = session.is_new(), "Access token bound to session");
    Ok(session)
}

/// Moves a checkout forward along an edge fixed by the handler's call order.
pub(crate) fn advance(from: CheckoutStage, to: CheckoutStage) -> CheckoutStage {
    debug_assert!(
        from.can_advance_to(to),
        "invalid checkout transition {} -> {}",
        from,
        to
    );
    tracing::debug!(from = %from, to = %to, last = to.is_final(), "Checkout stage advanced");
    to
}
