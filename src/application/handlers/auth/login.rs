//! LoginHandler - exchanges an authorization code and attests the identity.

use std::sync::Arc;

use crate::domain::attestation::{AttestationClaims, LoginAttestation};
use crate::domain::checkout::{AuthorizationCode, CheckoutError, CheckoutStage};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{AttestationSigner, PaymentProvider, Session, SessionStore};

use super::super::session_binding::{advance, bind_access_token};

/// Command to log in with a provider authorization code.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    /// Session named by the request cookie, if any.
    pub session_id: Option<SessionId>,
    pub authorization_code: AuthorizationCode,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The saved session now holding the access token.
    pub session: Session,
    pub attestation: LoginAttestation,
    pub stage: CheckoutStage,
}

/// Handler for login.
///
/// Order of effects: exchange the code, fetch the identity, bind the token
/// into the session and save it, then sign `"{email}:{timestamp}"`. Any
/// provider failure leaves the session untouched.
pub struct LoginHandler {
    provider: Arc<dyn PaymentProvider>,
    sessions: Arc<dyn SessionStore>,
    signer: Arc<dyn AttestationSigner>,
}

impl LoginHandler {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        sessions: Arc<dyn SessionStore>,
        signer: Arc<dyn AttestationSigner>,
    ) -> Self {
        Self {
            provider,
            sessions,
            signer,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, CheckoutError> {
        if cmd.authorization_code.is_empty() {
            return Err(CheckoutError::request_format(
                "Authorization code is required",
            ));
        }

        // 1. Exchange the code
        let token = self
            .provider
            .exchange_authorization_code(&cmd.authorization_code)
            .await?;
        let stage = advance(CheckoutStage::Unauthenticated, CheckoutStage::TokenAcquired);

        // 2. Resolve who the token belongs to
        let identity = self.provider.fetch_identity(&token).await?;
        if identity.email.trim().is_empty() {
            return Err(CheckoutError::provider_protocol(
                "identity response carried no email",
            ));
        }

        // 3. Bind the token to the caller's session
        let session = bind_access_token(self.sessions.as_ref(), cmd.session_id.as_ref(), token)
            .await?;

        // 4. Attest the identity
        let claims = AttestationClaims::login(identity.email.clone(), Timestamp::now().unix_secs());
        let signature = self.signer.sign(&claims.canonical_message())?;

        tracing::info!(session_id = %session.id(), "Login attested");

        Ok(LoginResult {
            session,
            attestation: LoginAttestation {
                email: identity.email,
                timestamp: claims.timestamp(),
                signature,
            },
            stage,
        })
    }
}
