//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, validation errors)
//! - `checkout` - Orders, captures, lifecycle stages and the checkout error taxonomy
//! - `attestation` - Canonical messages and signed attestations

pub mod attestation;
pub mod checkout;
pub mod foundation;
