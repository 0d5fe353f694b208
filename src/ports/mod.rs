//! Ports - interfaces between the checkout pipeline and the outside world.
//!
//! - `PaymentProvider` - token exchange, identity, order create and capture
//! - `SessionStore` - server-side sessions carrying the access token
//! - `AttestationSigner` - the server-held attestation key

mod attestation_signer;
mod payment_provider;
mod session_store;

pub use attestation_signer::{AttestationSigner, SigningError};
pub use payment_provider::{Identity, PaymentProvider, ProviderError, ProviderOperation};
pub use session_store::{Session, SessionStore, SessionStoreError};
