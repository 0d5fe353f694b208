//! Checkout handlers.
//!
//! The orchestration core: starting a checkout (token exchange, session
//! binding, order creation) and verifying the payment after the provider's
//! approval redirect (capture and attestation).

mod initiate_checkout;
mod verify_payment;

pub use initiate_checkout::{
    InitiateCheckoutCommand, InitiateCheckoutHandler, InitiateCheckoutResult,
};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
