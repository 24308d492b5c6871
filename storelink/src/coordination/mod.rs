//! Coordination layer tying the normalizer, linker, and session layers
//! into the operations the HTTP surface exposes.

mod accounts;
mod errors;
mod signin;

pub use accounts::{disconnect_core, list_links_core};
pub use errors::FederationError;
pub use signin::{callback_redirect_core, session_read_core, signin_core};
