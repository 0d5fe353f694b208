//! HTTP adapter for checkout endpoints.
//!
//! - `POST /api/paypal/checkout` - Start a checkout, returns the approval URL
//! - `POST /api/paypal/verify-payment` - Capture and attest an approved order

pub mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use routes::checkout_routes;
