//! Attestation signing adapter.
//!
//! Implements the `AttestationSigner` port with a secp256k1 key and offers
//! the matching offline verification for attestation recipients.

mod secp256k1_signer;

pub use secp256k1_signer::{
    recover_signer_address, verify_attestation, Secp256k1AttestationSigner, VerificationError,
};
