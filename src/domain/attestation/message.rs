//! Canonical attestation messages and their domain-separated prehash.
//!
//! Format of the hashed bytes:
//!
//! ```text
//! "\x19Ethereum Signed Message:\n" + len(message) + message
//! ```
//!
//! where `message` is the attested fields joined with `:` and `len` is its
//! byte length in decimal. The digest is Keccak-256, so any EIP-191 aware
//! verifier can recompute it from the fields alone.

use sha3::{Digest, Keccak256};

/// Separator between attested fields.
pub const FIELD_DELIMITER: &str = ":";

/// Domain-separation preamble mixed into every hashed message.
pub const SIGNED_MESSAGE_PREAMBLE: &str = "\x19Ethereum Signed Message:\n";

/// Colon-joined attested fields, in signing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMessage(String);

impl CanonicalMessage {
    /// Joins the fields in the order given.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|f| f.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(FIELD_DELIMITER);
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Preamble, decimal byte length, then the message itself.
    pub fn prefixed_bytes(&self) -> Vec<u8> {
        format!("{}{}{}", SIGNED_MESSAGE_PREAMBLE, self.0.len(), self.0).into_bytes()
    }

    /// Keccak-256 over [`Self::prefixed_bytes`]; this is what gets signed.
    pub fn prehash(&self) -> [u8; 32] {
        keccak256(&self.prefixed_bytes())
    }
}

/// Compute Keccak-256.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
