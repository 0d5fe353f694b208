//! Order creation request and result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ValidationError;

/// Link relation that marks the user-facing approval URL.
pub const APPROVE_REL: &str = "approve";

/// Caller-supplied order payload, forwarded verbatim to the provider.
///
/// Only structural well-formedness is checked here (a JSON object); amounts,
/// currencies and line items are the provider's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRequest(Map<String, Value>);

impl OrderRequest {
    pub fn new(payload: Map<String, Value>) -> Self {
        Self(payload)
    }

    /// Builds a request from an arbitrary JSON value, rejecting non-objects.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ValidationError::malformed(
                "orderData",
                "must be a JSON object",
            )),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Link attached to a created order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLink {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// Provider's answer to an order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreation {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub links: Vec<OrderLink>,
}

impl OrderCreation {
    /// The first non-empty link tagged [`APPROVE_REL`], if any.
    ///
    /// Without it there is no usable checkout, so callers treat `None` as a
    /// failed creation even when the provider reported success.
    pub fn approval_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == APPROVE_REL && !link.href.is_empty())
            .map(|link| link.href.as_str())
    }
}
