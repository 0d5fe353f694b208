//! VerifyPaymentHandler - captures an approved order and attests the outcome.

use std::sync::Arc;

use crate::domain::attestation::{AttestationClaims, PaymentAttestation};
use crate::domain::checkout::{CaptureVerdict, CheckoutError, CheckoutStage};
use crate::domain::foundation::{OrderId, SessionId, Timestamp};
use crate::ports::{AttestationSigner, PaymentProvider, SessionStore};

use super::super::session_binding::advance;

/// Command to verify (capture) a payment.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub session_id: Option<SessionId>,
    /// Order id as sent by the client; validated after the session check.
    pub order_id: String,
}

/// Business outcome of a verification. Both variants are successful calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyPaymentResult {
    /// Capture completed; the attestation is signed.
    Completed(PaymentAttestation),

    /// Well-formed capture in some other state. Nothing is signed.
    NotCompleted { order_id: OrderId, status: String },
}

impl VerifyPaymentResult {
    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::Captured {
            success: matches!(self, VerifyPaymentResult::Completed(_)),
        }
    }

    /// Client-facing explanation of a non-completed capture.
    pub fn failure_message(status: &str) -> String {
        format!("Payment was not successful, capture status: {}", status)
    }
}

/// Handler for payment verification.
///
/// Requires the access token bound to the caller's session; without it the
/// request is unauthorized regardless of the order id. The capture call is
/// issued on every invocation; repeat captures rely on the provider's own
/// idempotency.
pub struct VerifyPaymentHandler {
    provider: Arc<dyn PaymentProvider>,
    sessions: Arc<dyn SessionStore>,
    signer: Arc<dyn AttestationSigner>,
}

impl VerifyPaymentHandler {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        sessions: Arc<dyn SessionStore>,
        signer: Arc<dyn AttestationSigner>,
    ) -> Self {
        Self {
            provider,
            sessions,
            signer,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, CheckoutError> {
        // 1. Session continuity
        let session_id = cmd.session_id.ok_or_else(CheckoutError::missing_token)?;
        let session = self.sessions.load(Some(&session_id)).await?;
        let token = match session.access_token() {
            Some(token) if !session.is_new() => token.clone(),
            _ => {
                tracing::warn!(session_id = %session_id, "Verify payment without a token-bearing session");
                return Err(CheckoutError::missing_token());
            }
        };

        // 2. Order id
        let order_id = OrderId::new(cmd.order_id)?;

        // 3. Capture
        let capture = self.provider.capture_order(&token, &order_id).await?;
        let verdict = capture.verdict().map_err(|e| {
            tracing::error!(order_id = %order_id, error = %e, "Malformed capture result");
            e
        })?;

        // 4. Attest
        let result = match verdict {
            CaptureVerdict::NotCompleted { status } => {
                tracing::warn!(order_id = %order_id, status = %status, "Capture not completed");
                VerifyPaymentResult::NotCompleted { order_id, status }
            }
            CaptureVerdict::Completed { status } => {
                let claims = AttestationClaims::payment(
                    order_id.clone(),
                    status.clone(),
                    Timestamp::now().unix_secs(),
                );
                let signature = self.signer.sign(&claims.canonical_message())?;
                tracing::info!(order_id = %order_id, status = %status, "Payment attested");
                VerifyPaymentResult::Completed(PaymentAttestation {
                    order_id,
                    status,
                    timestamp: claims.timestamp(),
                    signature,
                })
            }
        };

        advance(CheckoutStage::OrderCreated, result.stage());
        Ok(result)
    }
}
