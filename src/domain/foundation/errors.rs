//! Value-object validation failures.

use thiserror::Error;

/// A caller-supplied value was rejected while building a domain type.
///
/// Every variant is the caller's fault and surfaces as a request format error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        ValidationError::Missing { field }
    }

    pub fn too_long(field: &'static str, max: usize) -> Self {
        ValidationError::TooLong { field, max }
    }

    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Malformed {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, as the caller spelled it.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Malformed { field, .. } => field,
        }
    }
}
