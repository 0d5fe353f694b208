//! HTTP handlers for checkout endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;

use crate::application::handlers::{InitiateCheckoutCommand, VerifyPaymentCommand};
use crate::domain::checkout::{AuthorizationCode, CheckoutError, OrderRequest};

use super::super::error::ApiError;
use super::super::session_cookie::{session_cookie, session_id_from};
use super::super::state::AppState;
use super::dto::{CheckoutRequest, CheckoutResponse, VerifyPaymentRequest, VerifyPaymentResponse};

fn malformed(e: JsonRejection) -> CheckoutError {
    CheckoutError::request_format(format!("Invalid request body: {}", e.body_text()))
}

/// POST /api/paypal/checkout - Exchange the code and create an order
pub async fn checkout(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(malformed)?;
    let order = OrderRequest::from_value(request.order_data).map_err(CheckoutError::from)?;

    let cmd = InitiateCheckoutCommand {
        session_id: session_id_from(&jar, &state.session_cookie),
        authorization_code: AuthorizationCode::new(request.login_token),
        order,
    };
    let result = state.initiate_checkout_handler().handle(cmd).await?;

    let jar = jar.add(session_cookie(&state.session_cookie, &result.session));
    Ok((
        jar,
        Json(CheckoutResponse {
            checkout_url: result.checkout_url,
        }),
    ))
}

/// POST /api/paypal/verify-payment - Capture the approved order and attest it
pub async fn verify_payment(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(malformed)?;
    tracing::debug!(order_id = %request.token, payer_id = ?request.payer_id, "Verifying payment");

    let cmd = VerifyPaymentCommand {
        session_id: session_id_from(&jar, &state.session_cookie),
        order_id: request.token,
    };
    let result = state.verify_payment_handler().handle(cmd).await?;

    Ok(Json(VerifyPaymentResponse::from(result)))
}
