//! Route configuration for checkout endpoints.

use axum::routing::post;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{checkout, verify_payment};

/// Creates the checkout router, mounted at `/api/paypal`.
///
/// Routes:
/// - `POST /checkout` - `{loginToken, orderData}`; returns `{checkoutUrl}`
/// - `POST /verify-payment` - `{token, PayerID}`; returns the attested outcome
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/verify-payment", post(verify_payment))
}
