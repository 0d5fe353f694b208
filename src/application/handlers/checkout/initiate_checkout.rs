//! InitiateCheckoutHandler - login and order creation in one request.

use std::sync::Arc;

use crate::domain::checkout::{AuthorizationCode, CheckoutError, CheckoutStage, OrderRequest};
use crate::domain::foundation::SessionId;
use crate::ports::{PaymentProvider, Session, SessionStore};

use super::super::session_binding::{advance, bind_access_token};

/// Command to start a checkout.
#[derive(Debug, Clone)]
pub struct InitiateCheckoutCommand {
    pub session_id: Option<SessionId>,
    pub authorization_code: AuthorizationCode,
    pub order: OrderRequest,
}

/// Result of a started checkout.
#[derive(Debug, Clone)]
pub struct InitiateCheckoutResult {
    /// The saved session holding the access token for the later capture.
    pub session: Session,
    /// Provider order id; the approval redirect brings it back as `token`.
    pub order_id: String,
    pub checkout_url: String,
    pub stage: CheckoutStage,
}

/// Handler for checkout initiation.
///
/// The token must be acquired and bound before the order is created. An
/// order created without an approval link fails the request; the orphaned
/// provider order is not voided.
///
/// An empty `loginToken` is a malformed body and is refused here with
/// `RequestFormat` before any provider call. The provider exchange itself
/// still rejects an empty code (`ProviderError::Rejected`), which surfaces as
/// `ProviderAuth` for any caller that reaches it.
pub struct InitiateCheckoutHandler {
    provider: Arc<dyn PaymentProvider>,
    sessions: Arc<dyn SessionStore>,
}

impl InitiateCheckoutHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { provider, sessions }
    }

    pub async fn handle(
        &self,
        cmd: InitiateCheckoutCommand,
    ) -> Result<InitiateCheckoutResult, CheckoutError> {
        if cmd.authorization_code.is_empty() {
            return Err(CheckoutError::request_format("loginToken is required"));
        }

        // 1. Exchange the code
        let token = self
            .provider
            .exchange_authorization_code(&cmd.authorization_code)
            .await?;
        let stage = advance(CheckoutStage::Unauthenticated, CheckoutStage::TokenAcquired);

        // 2. Bind it for the verify step after the approval redirect
        let session =
            bind_access_token(self.sessions.as_ref(), cmd.session_id.as_ref(), token.clone())
                .await?;

        // 3. Create the order
        let order = self.provider.create_order(&token, &cmd.order).await?;
        let checkout_url = order.approval_url().map(str::to_string).ok_or_else(|| {
            tracing::error!(
                order_id = %order.id,
                status = %order.status,
                links = order.links.len(),
                "Created order has no approve link"
            );
            CheckoutError::provider_protocol(format!(
                "Failed to retrieve checkout URL for order {}",
                order.id
            ))
        })?;
        let stage = advance(stage, CheckoutStage::OrderCreated);

        tracing::info!(session_id = %session.id(), order_id = %order.id, "Checkout initiated");

        Ok(InitiateCheckoutResult {
            session,
            order_id: order.id,
            checkout_url,
            stage,
        })
    }
}
