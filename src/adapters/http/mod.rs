//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own HTTP adapter; they share [`AppState`],
//! the session cookie handling and the two-tier [`ApiError`].

pub mod auth;
pub mod checkout;
pub mod error;
pub mod session_cookie;
mod state;

use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use session_cookie::SessionCookieConfig;
pub use state::AppState;

/// Create the complete API router.
///
/// # Routes
/// - `POST /api/auth/login`
/// - `GET /api/auth/checksession`
/// - `POST /api/paypal/checkout`
/// - `POST /api/paypal/verify-payment`
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth::auth_routes())
        .nest("/api/paypal", checkout::checkout_routes())
        .with_state(state)
}
