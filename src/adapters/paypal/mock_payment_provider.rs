//! Mock payment provider for testing.
//!
//! Provides a configurable implementation of `PaymentProvider` for unit and
//! integration tests. Supports:
//! - Single-use authorization codes mapped to tokens
//! - Pre-configured identities, orders and captures
//! - Error injection per method
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::checkout::{
    AccessToken, AuthorizationCode, Capture, CaptureResult, Money, OrderCreation, OrderLink,
    OrderRequest, PurchaseUnit, APPROVE_REL, COMPLETED_STATUS,
};
use crate::domain::foundation::OrderId;
use crate::ports::{Identity, PaymentProvider, ProviderError, ProviderOperation};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.add_authorization_code("AC1", "T1");
/// mock.set_identity("T1", "user@example.com");
/// mock.set_capture_status("PENDING");
///
/// let token = mock.exchange_authorization_code(&AuthorizationCode::new("AC1")).await?;
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Unused authorization codes and the token each one yields.
    codes: HashMap<String, String>,

    /// Identity email per access token.
    identities: HashMap<String, String>,

    /// Order to return on the next `create_order` call.
    next_order: Option<OrderCreation>,

    /// Capture result to return, per order id.
    captures: HashMap<String, CaptureResult>,

    /// Status used for generated captures (defaults to COMPLETED).
    capture_status: Option<String>,

    /// Number of generated orders.
    order_seq: u32,

    /// Specific errors by method name.
    method_errors: HashMap<String, ProviderError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Register a single-use authorization code.
    pub fn add_authorization_code(&self, code: &str, token: &str) {
        self.state()
            .codes
            .insert(code.to_string(), token.to_string());
    }

    /// Set the email reported for a token.
    pub fn set_identity(&self, token: &str, email: &str) {
        self.state()
            .identities
            .insert(token.to_string(), email.to_string());
    }

    /// Set the order to return on the next `create_order` call.
    pub fn set_next_order(&self, order: OrderCreation) {
        self.state().next_order = Some(order);
    }

    /// Set the capture result returned for an order.
    pub fn set_capture_result(&self, order_id: &str, result: CaptureResult) {
        self.state().captures.insert(order_id.to_string(), result);
    }

    /// Set the status of generated captures.
    pub fn set_capture_status(&self, status: &str) {
        self.state().capture_status = Some(status.to_string());
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: ProviderError) {
        self.state()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        self.state().method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), ProviderError> {
        match self.state().method_errors.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// An order whose approve link points at a fake checkout page.
    pub fn order_with_approval(id: &str) -> OrderCreation {
        OrderCreation {
            id: id.to_string(),
            status: "CREATED".to_string(),
            links: vec![
                OrderLink {
                    href: format!("https://api.paypal.test/v2/checkout/orders/{}", id),
                    rel: "self".to_string(),
                    method: Some("GET".to_string()),
                },
                OrderLink {
                    href: format!("https://pay.paypal.test/checkoutnow?token={}", id),
                    rel: APPROVE_REL.to_string(),
                    method: Some("GET".to_string()),
                },
            ],
        }
    }

    /// A capture result with a single capture in the given status.
    pub fn capture_with_status(order_id: &str, status: &str) -> CaptureResult {
        CaptureResult {
            id: order_id.to_string(),
            status: status.to_string(),
            purchase_units: vec![PurchaseUnit {
                captures: vec![Capture {
                    id: format!("CAP-{}", order_id),
                    status: status.to_string(),
                    amount: Some(Money {
                        currency_code: "USD".to_string(),
                        value: "10.00".to_string(),
                    }),
                    final_capture: true,
                }],
            }],
        }
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn exchange_authorization_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<AccessToken, ProviderError> {
        let operation = ProviderOperation::ExchangeAuthorizationCode;
        self.record_call("exchange_authorization_code", vec![code.as_str().to_string()]);
        self.check_error("exchange_authorization_code")?;

        if code.is_empty() {
            return Err(ProviderError::rejected(
                operation,
                None,
                "authorization code is empty",
            ));
        }

        // Codes are consumed on first use.
        match self.state().codes.remove(code.as_str()) {
            Some(token) if token.is_empty() => Err(ProviderError::protocol(
                operation,
                "success response without access_token",
            )),
            Some(token) => Ok(AccessToken::new(token)),
            None => Err(ProviderError::rejected(
                operation,
                Some(400),
                r#"{"error":"invalid_grant"}"#,
            )),
        }
    }

    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity, ProviderError> {
        self.record_call("fetch_identity", vec![]);
        self.check_error("fetch_identity")?;

        match self.state().identities.get(token.expose()) {
            Some(email) => Ok(Identity {
                email: email.clone(),
            }),
            None => Err(ProviderError::rejected(
                ProviderOperation::FetchIdentity,
                Some(401),
                r#"{"error":"invalid_token"}"#,
            )),
        }
    }

    async fn create_order(
        &self,
        _token: &AccessToken,
        request: &OrderRequest,
    ) -> Result<OrderCreation, ProviderError> {
        let payload = serde_json::to_string(request).unwrap_or_default();
        self.record_call("create_order", vec![payload]);
        self.check_error("create_order")?;

        let mut state = self.state();
        if let Some(order) = state.next_order.take() {
            return Ok(order);
        }
        state.order_seq += 1;
        Ok(Self::order_with_approval(&format!(
            "MOCK-ORDER-{}",
            state.order_seq
        )))
    }

    async fn capture_order(
        &self,
        _token: &AccessToken,
        order_id: &OrderId,
    ) -> Result<CaptureResult, ProviderError> {
        self.record_call("capture_order", vec![order_id.to_string()]);
        self.check_error("capture_order")?;

        let state = self.state();
        if let Some(result) = state.captures.get(order_id.as_str()) {
            return Ok(result.clone());
        }
        let status = state
            .capture_status
            .clone()
            .unwrap_or_else(|| COMPLETED_STATUS.to_string());
        Ok(Self::capture_with_status(order_id.as_str(), &status))
    }
}
