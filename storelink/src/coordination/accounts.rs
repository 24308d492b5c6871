use crate::linking::{AccountLink, AccountLinkStore};
use crate::session::SessionUser;

use super::errors::FederationError;

/// List the caller's linked external accounts
pub async fn list_links_core(
    user: Option<&SessionUser>,
) -> Result<Vec<AccountLink>, FederationError> {
    let user = user.ok_or_else(|| FederationError::Unauthorized.log())?;
    let links = AccountLinkStore::get_links_for_user(&user.id).await?;
    Ok(links)
}

/// Disconnect one provider from the caller's account.
///
/// Only removes the link; the user and their other links are untouched.
/// The next session read no longer carries the provider.
pub async fn disconnect_core(
    user: Option<&SessionUser>,
    provider: &str,
) -> Result<(), FederationError> {
    let user = user.ok_or_else(|| FederationError::Unauthorized.log())?;

    let deleted = AccountLinkStore::delete_link(&user.id, provider).await?;
    if deleted == 0 {
        return Err(FederationError::ResourceNotFound {
            resource_type: "AccountLink".to_string(),
            resource_id: provider.to_string(),
        }
        .log());
    }

    tracing::info!(user_id = %user.id, provider = %provider, "Disconnected provider");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Anonymous callers cannot list links
    #[tokio::test]
    async fn test_list_links_requires_authentication() {
        let result = list_links_core(None).await;
        assert!(matches!(result, Err(FederationError::Unauthorized)));
    }

    /// Anonymous callers cannot disconnect providers
    #[tokio::test]
    async fn test_disconnect_requires_authentication() {
        let result = disconnect_core(None, "gog").await;
        assert!(matches!(result, Err(FederationError::Unauthorized)));
    }
}
