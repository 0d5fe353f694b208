//! Capture results and the payment success predicate.

use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;

/// The only capture status that counts as a completed payment.
pub const COMPLETED_STATUS: &str = "COMPLETED";

/// Money amount as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency_code: String,
    pub value: String,
}

/// A single capture inside a purchase unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub id: String,
    pub status: String,
    pub amount: Option<Money>,
    pub final_capture: bool,
}

/// Purchase unit with its captures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub captures: Vec<Capture>,
}

/// Provider's answer to an order capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    pub id: String,
    pub status: String,
    pub purchase_units: Vec<PurchaseUnit>,
}

/// Business outcome of a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureVerdict {
    /// First capture of the first unit is `COMPLETED`.
    Completed { status: String },

    /// Well-formed result with any other status, pending states included.
    NotCompleted { status: String },
}

impl CaptureVerdict {
    pub fn status(&self) -> &str {
        match self {
            CaptureVerdict::Completed { status } | CaptureVerdict::NotCompleted { status } => {
                status
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CaptureVerdict::Completed { .. })
    }
}

impl CaptureResult {
    /// `purchase_units[0].captures[0]`, if present.
    pub fn first_capture(&self) -> Option<&Capture> {
        self.purchase_units
            .first()
            .and_then(|unit| unit.captures.first())
    }

    /// Applies the success predicate.
    ///
    /// Only the first capture of the first purchase unit is inspected;
    /// multi-capture and split-unit orders are not supported. A result with
    /// no purchase units or no captures is a protocol violation.
    pub fn verdict(&self) -> Result<CaptureVerdict, CheckoutError> {
        let capture = self.first_capture().ok_or_else(|| {
            CheckoutError::provider_protocol(format!(
                "capture of order {} returned no captures (order status {})",
                self.id, self.status
            ))
        })?;

        let status = capture.status.clone();
        if status == COMPLETED_STATUS {
            Ok(CaptureVerdict::Completed { status })
        } else {
            Ok(CaptureVerdict::NotCompleted { status })
        }
    }
}
