//! Checkout Attestor - session-bound PayPal checkout with signed attestations
//!
//! Exchanges a PayPal authorization code for an access token, binds it to a
//! client session, creates and captures orders, and returns secp256k1
//! attestations of the buyer's identity and of completed payments that can
//! be verified by recovering the signer address.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
