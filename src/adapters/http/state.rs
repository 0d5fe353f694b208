//! Shared application state for the HTTP adapters.

use std::sync::Arc;

use crate::application::handlers::{
    CheckSessionHandler, InitiateCheckoutHandler, LoginHandler, VerifyPaymentHandler,
};
use crate::ports::{AttestationSigner, PaymentProvider, SessionStore};

use super::session_cookie::SessionCookieConfig;

/// Shared application state containing all dependencies.
///
/// Cloned for each request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub session_store: Arc<dyn SessionStore>,
    pub signer: Arc<dyn AttestationSigner>,
    pub session_cookie: SessionCookieConfig,
}

impl AppState {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        session_store: Arc<dyn SessionStore>,
        signer: Arc<dyn AttestationSigner>,
        session_cookie: SessionCookieConfig,
    ) -> Self {
        Self {
            payment_provider,
            session_store,
            signer,
            session_cookie,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.payment_provider.clone(),
            self.session_store.clone(),
            self.signer.clone(),
        )
    }

    pub fn check_session_handler(&self) -> CheckSessionHandler {
        CheckSessionHandler::new(self.session_store.clone())
    }

    pub fn initiate_checkout_handler(&self) -> InitiateCheckoutHandler {
        InitiateCheckoutHandler::new(self.payment_provider.clone(), self.session_store.clone())
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.payment_provider.clone(),
            self.session_store.clone(),
            self.signer.clone(),
        )
    }
}
