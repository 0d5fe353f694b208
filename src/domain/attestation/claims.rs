//! Attestation claims and their signed forms.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::message::CanonicalMessage;
use crate::domain::foundation::{OrderId, ValidationError};

/// Byte length of a recoverable secp256k1 signature (`r || s || v`).
pub const SIGNATURE_LEN: usize = 65;

/// The facts an attestation vouches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttestationClaims {
    /// The provider account behind a token has this email.
    Login { identity: String, timestamp: u64 },

    /// An order was captured with this status.
    Payment {
        order_id: OrderId,
        status: String,
        timestamp: u64,
    },
}

impl AttestationClaims {
    pub fn login(identity: impl Into<String>, timestamp: u64) -> Self {
        AttestationClaims::Login {
            identity: identity.into(),
            timestamp,
        }
    }

    pub fn payment(order_id: OrderId, status: impl Into<String>, timestamp: u64) -> Self {
        AttestationClaims::Payment {
            order_id,
            status: status.into(),
            timestamp,
        }
    }

    /// `"{identity}:{ts}"` or `"{orderID}:{status}:{ts}"`.
    pub fn canonical_message(&self) -> CanonicalMessage {
        match self {
            AttestationClaims::Login {
                identity,
                timestamp,
            } => CanonicalMessage::from_fields([identity.clone(), timestamp.to_string()]),
            AttestationClaims::Payment {
                order_id,
                status,
                timestamp,
            } => CanonicalMessage::from_fields([
                order_id.to_string(),
                status.clone(),
                timestamp.to_string(),
            ]),
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            AttestationClaims::Login { timestamp, .. }
            | AttestationClaims::Payment { timestamp, .. } => *timestamp,
        }
    }
}

/// Hex-encoded recoverable signature, `0x`-prefixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttestationSignature(String);

impl AttestationSignature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Parses a transported signature, with or without the `0x` prefix.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let bytes = decode_hex(value)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_bytes(&self) -> Result<[u8; SIGNATURE_LEN], ValidationError> {
        decode_hex(&self.0)
    }
}

impl fmt::Display for AttestationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn decode_hex(value: &str) -> Result<[u8; SIGNATURE_LEN], ValidationError> {
    let raw = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(raw)
        .map_err(|e| ValidationError::malformed("signature", e.to_string()))?;
    <[u8; SIGNATURE_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        ValidationError::malformed(
            "signature",
            format!("expected {} bytes, got {}", SIGNATURE_LEN, bytes.len()),
        )
    })
}

/// Signed statement that an account logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttestation {
    pub email: String,
    pub timestamp: u64,
    pub signature: AttestationSignature,
}

/// Signed statement that an order was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAttestation {
    pub order_id: OrderId,
    pub status: String,
    pub timestamp: u64,
    pub signature: AttestationSignature,
}

impl LoginAttestation {
    pub fn claims(&self) -> AttestationClaims {
        AttestationClaims::login(self.email.clone(), self.timestamp)
    }
}

impl PaymentAttestation {
    pub fn claims(&self) -> AttestationClaims {
        AttestationClaims::payment(self.order_id.clone(), self.status.clone(), self.timestamp)
    }
}
