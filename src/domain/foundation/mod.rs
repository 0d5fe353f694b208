//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps and validation errors.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{OrderId, SessionId};
pub use timestamp::Timestamp;
