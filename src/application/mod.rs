//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CheckSessionHandler, CheckSessionQuery, InitiateCheckoutCommand, InitiateCheckoutHandler,
    InitiateCheckoutResult, LoginCommand, LoginHandler, LoginResult, SessionStatus,
    VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult,
};
