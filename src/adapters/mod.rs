//! Adapters - implementations of ports and the HTTP surface.
//!
//! - `paypal` - PayPal REST client (and a mock provider for tests)
//! - `session` - in-memory and Redis session stores
//! - `signing` - secp256k1 attestation signer and verification
//! - `http` - axum routers, DTOs and error mapping

pub mod http;
pub mod paypal;
pub mod session;
pub mod signing;
