//! Payment provider port for the authorize → create → capture flow.
//!
//! Four stateless calls against the provider's REST API. Implementations
//! perform exactly one network round trip per call, never retry, and never
//! cache results.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::checkout::{
    AccessToken, AuthorizationCode, CaptureResult, CheckoutError, OrderCreation, OrderRequest,
};
use crate::domain::foundation::OrderId;

/// Port for the payment provider acting on a user's behalf.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Exchange a single-use authorization code for an access token.
    ///
    /// An empty code is refused without contacting the provider. A success
    /// response without a non-empty token is a protocol error.
    async fn exchange_authorization_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<AccessToken, ProviderError>;

    /// Fetch the account identity behind a token.
    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity, ProviderError>;

    /// Create an order from a caller-supplied payload.
    ///
    /// Only a `201 Created` answer counts as success.
    async fn create_order(
        &self,
        token: &AccessToken,
        request: &OrderRequest,
    ) -> Result<OrderCreation, ProviderError>;

    /// Capture an approved order. Any status ≥ 300 is a failure.
    async fn capture_order(
        &self,
        token: &AccessToken,
        order_id: &OrderId,
    ) -> Result<CaptureResult, ProviderError>;
}

/// Account identity reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

/// Which provider call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOperation {
    ExchangeAuthorizationCode,
    FetchIdentity,
    CreateOrder,
    CaptureOrder,
}

impl fmt::Display for ProviderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderOperation::ExchangeAuthorizationCode => "exchange_authorization_code",
            ProviderOperation::FetchIdentity => "fetch_identity",
            ProviderOperation::CreateOrder => "create_order",
            ProviderOperation::CaptureOrder => "capture_order",
        };
        write!(f, "{}", s)
    }
}

/// Provider call failures.
///
/// `detail` may hold the provider's response body; it is meant for
/// server-side logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status, or the input was
    /// refused before sending.
    #[error("{operation} rejected (status {status:?}): {detail}")]
    Rejected {
        operation: ProviderOperation,
        status: Option<u16>,
        detail: String,
    },

    /// The call never completed: connect failure, timeout, broken body.
    #[error("{operation} transport failure: {detail}")]
    Transport {
        operation: ProviderOperation,
        detail: String,
    },

    /// Success status, but the response broke an expected invariant.
    #[error("{operation} returned an invalid response: {detail}")]
    Protocol {
        operation: ProviderOperation,
        detail: String,
    },
}

impl ProviderError {
    pub fn rejected(
        operation: ProviderOperation,
        status: Option<u16>,
        detail: impl Into<String>,
    ) -> Self {
        ProviderError::Rejected {
            operation,
            status,
            detail: detail.into(),
        }
    }

    pub fn transport(operation: ProviderOperation, detail: impl Into<String>) -> Self {
        ProviderError::Transport {
            operation,
            detail: detail.into(),
        }
    }

    pub fn protocol(operation: ProviderOperation, detail: impl Into<String>) -> Self {
        ProviderError::Protocol {
            operation,
            detail: detail.into(),
        }
    }

    pub fn operation(&self) -> ProviderOperation {
        match self {
            ProviderError::Rejected { operation, .. }
            | ProviderError::Transport { operation, .. }
            | ProviderError::Protocol { operation, .. } => *operation,
        }
    }
}

impl From<ProviderError> for CheckoutError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Protocol { .. } => CheckoutError::provider_protocol(err.to_string()),
            ProviderError::Rejected { .. } | ProviderError::Transport { .. } => {
                CheckoutError::provider_auth(err.to_string())
            }
        }
    }
}
