//! Account linker: the only component that creates users. Resolves a
//! normalized identity to a canonical local user inside one storage
//! transaction, so a crash can never leave a link without its user.

mod errors;
mod storage;
mod types;

pub use errors::LinkError;
pub use storage::AccountLinkStore;
pub use types::{AccountLink, ResolveRequest};

pub(crate) use types::FreshIds;

use uuid::Uuid;

use crate::userdb::User;
use crate::utils::gen_random_string;

pub(crate) async fn init() -> Result<(), LinkError> {
    AccountLinkStore::init().await
}

/// Stable account key for users created from a provider identity. The
/// namespaced form keeps keys from different providers disjoint and is
/// deliberately not shaped like an email address.
pub fn synthetic_account_key(provider: &str, provider_account_id: &str) -> String {
    format!("{provider}:{provider_account_id}")
}

/// Resolve a verified identity to its owning user, creating the user
/// and/or link as needed. Repeat sign-ins from the same external account
/// converge on the same user with no duplicate rows.
pub async fn resolve_link(request: &ResolveRequest) -> Result<User, LinkError> {
    let fresh = FreshIds {
        user_id: Uuid::new_v4().to_string(),
        link_id: gen_random_string(32)
            .map_err(|e| LinkError::Storage(e.to_string()))?,
    };

    let user = AccountLinkStore::resolve_link(request, &fresh).await?;

    tracing::debug!(
        user_id = %user.id,
        provider = %request.identity.provider,
        "Resolved account link"
    );

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_account_key_is_namespaced() {
        let key = synthetic_account_key("steam-credentials", "76561198000000000");
        assert_eq!(key, "steam-credentials:76561198000000000");
    }

    #[test]
    fn test_synthetic_account_key_not_email_shaped() {
        let key = synthetic_account_key("gog", "48628349");
        assert!(!key.contains('@'));
    }

    #[test]
    fn test_keys_from_different_providers_are_disjoint() {
        let a = synthetic_account_key("epic", "12345");
        let b = synthetic_account_key("gog", "12345");
        assert_ne!(a, b);
    }
}
