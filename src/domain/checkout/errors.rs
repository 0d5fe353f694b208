//! Checkout error taxonomy.
//!
//! Every failure the pipeline can surface is one of five kinds. The variants
//! keep the detailed, internal description; [`CheckoutError::public_message`]
//! is the coarse text that is safe to show to a client.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | RequestFormat | 400 |
//! | Session(MissingToken) | 401 |
//! | Session(Store) | 500 |
//! | ProviderAuth | 500 |
//! | ProviderProtocol | 500 |
//! | Signing | 500 |

use std::fmt;

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Closed set of checkout failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Malformed body or missing field. The caller's fault.
    #[error("Malformed request: {0}")]
    RequestFormat(String),

    /// Missing or unusable session state.
    #[error("Session error: {0}")]
    Session(SessionFault),

    /// The provider call did not succeed (non-success status, refused input,
    /// or the call never completed).
    #[error("Provider call failed: {0}")]
    ProviderAuth(String),

    /// The provider reported success but the response broke an invariant.
    #[error("Provider response rejected: {0}")]
    ProviderProtocol(String),

    /// Signing key unavailable or the signing primitive failed.
    #[error("Attestation signing failed: {0}")]
    Signing(String),
}

/// What went wrong with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFault {
    /// The session bound to the request carries no access token.
    MissingToken,

    /// The session store could not be read or written.
    Store(String),
}

impl fmt::Display for SessionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionFault::MissingToken => write!(f, "access token not found in session"),
            SessionFault::Store(msg) => write!(f, "session store failure: {}", msg),
        }
    }
}

impl CheckoutError {
    pub fn request_format(message: impl Into<String>) -> Self {
        CheckoutError::RequestFormat(message.into())
    }

    pub fn missing_token() -> Self {
        CheckoutError::Session(SessionFault::MissingToken)
    }

    pub fn session_store(message: impl Into<String>) -> Self {
        CheckoutError::Session(SessionFault::Store(message.into()))
    }

    pub fn provider_auth(message: impl Into<String>) -> Self {
        CheckoutError::ProviderAuth(message.into())
    }

    pub fn provider_protocol(message: impl Into<String>) -> Self {
        CheckoutError::ProviderProtocol(message.into())
    }

    pub fn signing(message: impl Into<String>) -> Self {
        CheckoutError::Signing(message.into())
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::RequestFormat(_) => "REQUEST_FORMAT_ERROR",
            CheckoutError::Session(SessionFault::MissingToken) => "UNAUTHORIZED",
            CheckoutError::Session(SessionFault::Store(_)) => "SESSION_ERROR",
            CheckoutError::ProviderAuth(_) => "PROVIDER_ERROR",
            CheckoutError::ProviderProtocol(_) => "PROVIDER_PROTOCOL_ERROR",
            CheckoutError::Signing(_) => "SIGNING_ERROR",
        }
    }

    /// Client-facing message. Never contains provider internals.
    pub fn public_message(&self) -> String {
        match self {
            // Request format details come from the caller's own input.
            CheckoutError::RequestFormat(msg) => msg.clone(),
            CheckoutError::Session(SessionFault::MissingToken) => {
                "Access token not found in session".to_string()
            }
            CheckoutError::Session(SessionFault::Store(_)) => {
                "Session storage is unavailable".to_string()
            }
            CheckoutError::ProviderAuth(_) => {
                "The payment provider rejected the request".to_string()
            }
            CheckoutError::ProviderProtocol(_) => {
                "The payment provider returned an unusable response".to_string()
            }
            CheckoutError::Signing(_) => "Unable to sign the attestation".to_string(),
        }
    }

    /// True when the failure is attributable to the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::RequestFormat(_) | CheckoutError::Session(SessionFault::MissingToken)
        )
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::RequestFormat(err.to_string())
    }
}
