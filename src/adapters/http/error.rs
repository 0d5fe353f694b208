//! Two-tier error responses.
//!
//! The full internal error is logged here; the client gets only
//! `{code, message}` with the coarse public message for its kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::{CheckoutError, SessionFault};

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Wrapper turning a `CheckoutError` into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CheckoutError);

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CheckoutError::RequestFormat(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Session(SessionFault::MissingToken) => StatusCode::UNAUTHORIZED,
            CheckoutError::Session(SessionFault::Store(_))
            | CheckoutError::ProviderAuth(_)
            | CheckoutError::ProviderProtocol(_)
            | CheckoutError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            tracing::warn!(code = self.0.code(), error = %self.0, "Request rejected");
        } else {
            tracing::error!(code = self.0.code(), error = %self.0, "Request failed");
        }

        let body = ErrorResponse::new(self.0.code(), self.0.public_message());
        (status, Json(body)).into_response()
    }
}
