//! Attestation signing key configuration

use secrecy::SecretString;
use serde::Deserialize;

/// Signing key for attestations.
///
/// The key is optional at load time. A missing or malformed key is reported
/// when the signer is built and fails every signing call instead of startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SigningConfig {
    /// Hex-encoded secp256k1 private key, with or without `0x`
    pub private_key: Option<SecretString>,
}

impl SigningConfig {
    pub fn is_configured(&self) -> bool {
        self.private_key.is_some()
    }
}
