//! PayPal payment provider adapter.
//!
//! Implements the `PaymentProvider` port for PayPal's REST API, including:
//! - Authorization-code exchange (Log In with PayPal)
//! - OpenID identity lookup
//! - Order creation and capture
//!
//! # Security
//!
//! - Client credentials and access tokens are handled via `secrecy::SecretString`
//! - Every call runs under an explicit deadline
//!
//! # Configuration
//!
//! Required environment variables:
//! - `CHECKOUT_ATTESTOR__PAYPAL__CLIENT_ID`
//! - `CHECKOUT_ATTESTOR__PAYPAL__CLIENT_SECRET`

mod api_types;
mod mock_payment_provider;
mod paypal_adapter;

pub use api_types::{
    PayPalCaptureResponse, PayPalOrder, PayPalTokenResponse, PayPalUserInfo,
};
pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use paypal_adapter::{PayPalConfig, PayPalPaymentAdapter, SANDBOX_BASE_URL};
