//! Request and response DTOs for checkout endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::VerifyPaymentResult;

/// Body of `POST /api/paypal/checkout`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Authorization code from the provider's consent flow.
    #[serde(rename = "loginToken")]
    pub login_token: String,

    /// Order payload forwarded verbatim; must be a JSON object.
    #[serde(rename = "orderData")]
    pub order_data: Value,
}

/// Response carrying the provider approval URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(rename = "checkoutUrl")]
    pub checkout_url: String,
}

/// Body of `POST /api/paypal/verify-payment`, as appended to the provider's
/// return URL.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    /// The provider order id.
    #[serde(default)]
    pub token: String,

    #[serde(rename = "PayerID", default)]
    pub payer_id: Option<String>,
}

/// Completed payment with its attestation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerifiedResponse {
    pub success: bool,
    #[serde(rename = "orderID")]
    pub order_id: String,
    pub status: String,
    pub timestamp: u64,
    pub signature: String,
}

/// Capture that did not complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotCompletedResponse {
    pub success: bool,
    pub message: String,
}

/// Either outcome of a verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifyPaymentResponse {
    Verified(PaymentVerifiedResponse),
    NotCompleted(PaymentNotCompletedResponse),
}

impl From<VerifyPaymentResult> for VerifyPaymentResponse {
    fn from(result: VerifyPaymentResult) -> Self {
        match result {
            VerifyPaymentResult::Completed(att) => {
                VerifyPaymentResponse::Verified(PaymentVerifiedResponse {
                    success: true,
                    order_id: att.order_id.to_string(),
                    status: att.status,
                    timestamp: att.timestamp,
                    signature: att.signature.to_string(),
                })
            }
            VerifyPaymentResult::NotCompleted { status, .. } => {
                VerifyPaymentResponse::NotCompleted(PaymentNotCompletedResponse {
                    success: false,
                    message: VerifyPaymentResult::failure_message(&status),
                })
            }
        }
    }
}
