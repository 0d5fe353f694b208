//! AttestationSigner port - signs canonical attestation messages.

use thiserror::Error;

use crate::domain::attestation::{AttestationSignature, CanonicalMessage};
use crate::domain::checkout::CheckoutError;

/// Port for the server-held signing key.
///
/// Signing is deterministic: the same message always yields the same
/// signature, so recipients can recompute the hash from fields they hold and
/// verify offline.
pub trait AttestationSigner: Send + Sync {
    fn sign(&self, message: &CanonicalMessage) -> Result<AttestationSignature, SigningError>;
}

/// Signing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// No usable private key was configured.
    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),

    /// The signing primitive itself failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

impl From<SigningError> for CheckoutError {
    fn from(err: SigningError) -> Self {
        CheckoutError::signing(err.to_string())
    }
}
