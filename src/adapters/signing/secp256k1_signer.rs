//! secp256k1 attestation signer and offline verification helpers.
//!
//! Signatures are recoverable ECDSA over the Keccak-256 prehash of the
//! canonical message, encoded as 65 bytes `r || s || v` with `v` in `{0, 1}`.
//! Nonces are RFC 6979 deterministic and `s` is low-S normalised, so equal
//! messages always give equal signatures.
//!
//! Recipients identify the signer by its Ethereum-style address: the last
//! 20 bytes of Keccak-256 over the uncompressed public key.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::domain::attestation::{
    keccak256, AttestationClaims, AttestationSignature, CanonicalMessage, SIGNATURE_LEN,
};
use crate::ports::{AttestationSigner, SigningError};

/// Signer backed by a server-held secp256k1 key.
///
/// A missing or malformed key does not prevent construction; every
/// [`AttestationSigner::sign`] call then fails with
/// [`SigningError::KeyUnavailable`].
pub struct Secp256k1AttestationSigner {
    key: Result<SigningKey, String>,
}

impl Secp256k1AttestationSigner {
    /// Parse a hex private key, with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self, SigningError> {
        let key = parse_key(private_key).map_err(SigningError::KeyUnavailable)?;
        Ok(Self { key: Ok(key) })
    }

    /// Build from optional configuration, deferring key errors to signing time.
    pub fn from_config(private_key: Option<&SecretString>) -> Self {
        let key = match private_key {
            Some(secret) => parse_key(secret.expose_secret()),
            None => Err("no private key configured".to_string()),
        };
        Self { key }
    }

    pub fn is_ready(&self) -> bool {
        self.key.is_ok()
    }

    /// Why the key could not be loaded, if it could not.
    pub fn load_error(&self) -> Option<&str> {
        self.key.as_ref().err().map(String::as_str)
    }

    /// Address recipients use to check attestations from this signer.
    pub fn address(&self) -> Option<String> {
        self.key
            .as_ref()
            .ok()
            .map(|key| address_of(key.verifying_key()))
    }
}

fn parse_key(private_key: &str) -> Result<SigningKey, String> {
    let trimmed = private_key.trim();
    let raw = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if raw.is_empty() {
        return Err("private key is empty".to_string());
    }
    // Error text never echoes the key material.
    let bytes = hex::decode(raw).map_err(|_| "private key is not valid hex".to_string())?;
    SigningKey::from_slice(&bytes).map_err(|_| "private key is not a valid secp256k1 scalar".to_string())
}

impl AttestationSigner for Secp256k1AttestationSigner {
    fn sign(&self, message: &CanonicalMessage) -> Result<AttestationSignature, SigningError> {
        let key = self
            .key
            .as_ref()
            .map_err(|reason| SigningError::KeyUnavailable(reason.clone()))?;

        let (signature, recovery_id) = key
            .sign_prehash_recoverable(&message.prehash())
            .map_err(|e| SigningError::SigningFailed(e.to_string()))?;

        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte();
        Ok(AttestationSignature::from_bytes(bytes))
    }
}

/// Failures when checking an attestation offline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signer recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("signer mismatch: expected {expected}, recovered {recovered}")]
    SignerMismatch { expected: String, recovered: String },
}

/// Recover the signer address of `signature` over `message`.
///
/// Accepts `v` as `0/1` or the legacy `27/28`.
pub fn recover_signer_address(
    message: &CanonicalMessage,
    signature: &AttestationSignature,
) -> Result<String, VerificationError> {
    let bytes = signature
        .to_bytes()
        .map_err(|e| VerificationError::MalformedSignature(e.to_string()))?;

    let v = match bytes[64] {
        27 | 28 => bytes[64] - 27,
        v => v,
    };
    let recovery_id = RecoveryId::from_byte(v).ok_or_else(|| {
        VerificationError::MalformedSignature(format!("invalid recovery id {}", bytes[64]))
    })?;
    let sig = Signature::from_slice(&bytes[..64])
        .map_err(|e| VerificationError::MalformedSignature(e.to_string()))?;

    let key = VerifyingKey::recover_from_prehash(&message.prehash(), &sig, recovery_id)
        .map_err(|e| VerificationError::RecoveryFailed(e.to_string()))?;
    Ok(address_of(&key))
}

/// Check that `signature` over `claims` was produced by `expected_address`.
pub fn verify_attestation(
    claims: &AttestationClaims,
    signature: &AttestationSignature,
    expected_address: &str,
) -> Result<(), VerificationError> {
    let recovered = recover_signer_address(&claims.canonical_message(), signature)?;
    if !recovered.eq_ignore_ascii_case(expected_address) {
        return Err(VerificationError::SignerMismatch {
            expected: expected_address.to_string(),
            recovered,
        });
    }
    Ok(())
}

fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}
