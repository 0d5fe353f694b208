//! Request and response DTOs for auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::attestation::LoginAttestation;

/// Form field carrying the provider authorization code.
pub const AUTHORIZATION_CODE_FIELD: &str = "authorizationCode";

/// Form body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "authorizationCode", default)]
    pub authorization_code: Option<String>,
}

/// Signed login attestation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub email: String,
    pub timestamp: u64,
    pub signature: String,
}

impl From<LoginAttestation> for LoginResponse {
    fn from(att: LoginAttestation) -> Self {
        Self {
            email: att.email,
            timestamp: att.timestamp,
            signature: att.signature.to_string(),
        }
    }
}

/// Plaintext bodies of `GET /api/auth/checksession`.
pub const SESSION_ALIVE: &str = "Session alive";
pub const SESSION_EXPIRED: &str = "Session expired or invalid";
