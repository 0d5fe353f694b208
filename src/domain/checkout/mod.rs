//! Checkout domain - the authorize → bind → create → capture lifecycle.
//!
//! Holds the provider-neutral shapes of orders and captures, the policies
//! applied to them (approval link extraction, capture success predicate),
//! the lifecycle stages and the error taxonomy surfaced by the pipeline.

mod capture;
mod credentials;
mod errors;
mod order;
mod stage;

pub use capture::{Capture, CaptureResult, CaptureVerdict, Money, PurchaseUnit, COMPLETED_STATUS};
pub use credentials::{AccessToken, AuthorizationCode};
pub use errors::{CheckoutError, SessionFault};
pub use order::{OrderCreation, OrderLink, OrderRequest, APPROVE_REL};
pub use stage::CheckoutStage;
