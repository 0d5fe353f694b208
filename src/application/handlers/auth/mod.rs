//! Auth handlers.
//!
//! ## Commands
//! - Logging in with a provider authorization code
//!
//! ## Queries
//! - Checking whether the caller's session is alive

mod check_session;
mod login;

pub use check_session::{CheckSessionHandler, CheckSessionQuery, SessionStatus};
pub use login::{LoginCommand, LoginHandler, LoginResult};
