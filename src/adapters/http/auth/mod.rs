//! HTTP adapter for auth endpoints.
//!
//! - `POST /api/auth/login` - Log in and receive a signed identity attestation
//! - `GET /api/auth/checksession` - Check whether the session is alive

pub mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use routes::auth_routes;
