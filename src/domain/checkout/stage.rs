//! Checkout lifecycle stages.

use std::fmt;

/// Where an in-flight checkout stands.
///
/// ```text
/// Unauthenticated → TokenAcquired → OrderCreated → Captured { success }
/// ```
///
/// Login stops at `TokenAcquired`; checkout initiation runs up to
/// `OrderCreated`; payment verification resumes at `OrderCreated` with the
/// token bound to the session and ends in `Captured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    Unauthenticated,
    TokenAcquired,
    OrderCreated,
    Captured { success: bool },
}

impl CheckoutStage {
    /// Whether `next` directly follows `self`.
    pub fn can_advance_to(self, next: CheckoutStage) -> bool {
        use CheckoutStage::*;
        matches!(
            (self, next),
            (Unauthenticated, TokenAcquired)
                | (TokenAcquired, OrderCreated)
                | (OrderCreated, Captured { .. })
        )
    }

    /// Captured checkouts, successful or not, go nowhere else.
    pub fn is_final(self) -> bool {
        matches!(self, CheckoutStage::Captured { .. })
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckoutStage::Unauthenticated => "unauthenticated",
            CheckoutStage::TokenAcquired => "token_acquired",
            CheckoutStage::OrderCreated => "order_created",
            CheckoutStage::Captured { success: true } => "captured",
            CheckoutStage::Captured { success: false } => "capture_failed",
        };
        write!(f, "{}", s)
    }
}
