use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::linking::AccountLink;
use crate::registry::STEAM_PROVIDER;

/// One linked external account as projected into the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub provider: String,
    pub provider_account_id: String,
}

impl From<&AccountLink> for LinkedAccount {
    fn from(link: &AccountLink) -> Self {
        Self {
            provider: link.provider.clone(),
            provider_account_id: link.provider_account_id.clone(),
        }
    }
}

/// The authenticated user as seen by API consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub account: String,
    pub label: String,
    pub picture: Option<String>,
    /// All currently linked external accounts, loaded fresh on read
    pub accounts: Vec<LinkedAccount>,
    /// SteamID64 of the delegated-auth link, if one exists
    pub steam_id: Option<String>,
}

/// Signed token payload. The linked-account set inside the token is a
/// snapshot from mint time; reads reload it from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
    pub accounts: Vec<LinkedAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<String>,
}

/// What a session read returns. Always well-formed, even for anonymous
/// or expired sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<SessionUser>,
    pub expires: Option<DateTime<Utc>>,
    pub authenticated: bool,
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self {
            user: None,
            expires: None,
            authenticated: false,
        }
    }
}

/// The SteamID64 convenience field comes from the delegated-auth link
pub(crate) fn project_steam_id(links: &[AccountLink]) -> Option<String> {
    links
        .iter()
        .find(|link| link.provider == STEAM_PROVIDER)
        .map(|link| link.provider_account_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(provider: &str, provider_account_id: &str) -> AccountLink {
        AccountLink {
            id: "l1".to_string(),
            user_id: "u1".to_string(),
            provider: provider.to_string(),
            provider_account_id: provider_account_id.to_string(),
            link_type: "credentials".to_string(),
            payload: None,
            display_name: "name".to_string(),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_project_steam_id_present() {
        let links = vec![link("gog", "1"), link(STEAM_PROVIDER, "76561198000000000")];
        assert_eq!(
            project_steam_id(&links),
            Some("76561198000000000".to_string())
        );
    }

    #[test]
    fn test_project_steam_id_absent() {
        let links = vec![link("gog", "1"), link("epic", "2")];
        assert_eq!(project_steam_id(&links), None);
    }

    #[test]
    fn test_anonymous_snapshot_shape() {
        let snapshot = SessionSnapshot::anonymous();
        assert!(!snapshot.authenticated);
        assert!(snapshot.user.is_none());
        assert!(snapshot.expires.is_none());

        let json = serde_json::to_value(&snapshot).expect("snapshot should serialize");
        assert_eq!(json["authenticated"], false);
        assert!(json["user"].is_null());
    }
}
