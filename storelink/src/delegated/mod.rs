//! Delegated-auth verifier for Steam's OpenID 2.0 flow. The browser is
//! sent to Steam, Steam redirects back with a signed assertion, and the
//! assertion is re-posted to Steam for stateless verification. No nonce
//! or association state is kept on this side; Steam rejects replayed
//! assertions itself.

mod config;
mod errors;
mod verify;

pub use config::{DELEGATED_COMPLETE_ROUTE, DELEGATED_ERROR_ROUTE};
pub use errors::DelegatedError;
pub use verify::{build_authorize_url, verify_callback};
