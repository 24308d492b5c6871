//! storelink - external identity federation and account linking
//!
//! This crate authenticates users against heterogeneous storefront
//! credential sources (delegated Steam OpenID, bearer-token profile
//! lookups, ticket logins, authorization-code flows), normalizes the
//! result into one canonical local identity, and enriches a stateless
//! session token with the set of linked external accounts.

mod client;
mod config;
mod coordination;
mod delegated;
mod linking;
mod normalize;
mod registry;
mod session;
mod storage;
mod userdb;
mod utils;

// Re-export the main coordination components
pub use coordination::{
    FederationError, callback_redirect_core, disconnect_core, list_links_core, session_read_core,
    signin_core,
};

// Re-export the route prefix
pub use config::SL_ROUTE_PREFIX;

pub use delegated::{
    DELEGATED_COMPLETE_ROUTE, DELEGATED_ERROR_ROUTE, DelegatedError, build_authorize_url,
    verify_callback,
};

pub use linking::{
    AccountLink, AccountLinkStore, LinkError, ResolveRequest, resolve_link, synthetic_account_key,
};

pub use normalize::{NormalizeError, NormalizedIdentity, ProviderProfile, normalize_credentials};

pub use registry::{
    LinkType, PROVIDER_REGISTRY, ProviderDescriptor, ProviderKind, STEAM_PROVIDER, descriptor,
};

pub use session::{
    LinkedAccount, SESSION_COOKIE_NAME, SessionError, SessionSnapshot, SessionUser,
    get_session_token_from_headers, mint_session, prepare_logout_response, read_session,
};

pub use userdb::{User, UserError, UserStore};

pub use utils::UtilError;

/// Initialize the underlying stores (creates tables on first run)
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    userdb::init().await?;
    linking::init().await?;
    Ok(())
}
