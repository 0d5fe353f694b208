//! Attestation domain - signed statements about login and payment outcomes.
//!
//! Claims render to a canonical colon-joined message; the message is hashed
//! behind a domain-separation preamble and signed by an
//! [`AttestationSigner`](crate::ports::AttestationSigner). Attestations are
//! handed to the caller and never persisted.

mod claims;
mod message;

pub use claims::{
    AttestationClaims, AttestationSignature, LoginAttestation, PaymentAttestation, SIGNATURE_LEN,
};
pub use message::{keccak256, CanonicalMessage, FIELD_DELIMITER, SIGNED_MESSAGE_PREAMBLE};
