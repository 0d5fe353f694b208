//! Application handlers.
//!
//! Command and query handlers that orchestrate the checkout pipeline.

pub mod auth;
pub mod checkout;

mod session_binding;

pub use auth::{
    CheckSessionHandler, CheckSessionQuery, LoginCommand, LoginHandler, LoginResult,
    SessionStatus,
};
pub use checkout::{
    InitiateCheckoutCommand, InitiateCheckoutHandler, InitiateCheckoutResult,
    VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult,
};
