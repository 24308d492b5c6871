use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::normalize::NormalizedIdentity;
use crate::registry::LinkType;

/// One linked external account. `(provider, provider_account_id)` is
/// unique across the whole table, so an external account can belong to
/// at most one user at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AccountLink {
    pub id: String,
    pub user_id: String,
    pub provider: String,
    pub provider_account_id: String,
    /// Stable kind string, see [`LinkType::as_str`](crate::registry::LinkType::as_str)
    pub link_type: String,
    /// Provider material retained for later use, e.g. a bearer token
    pub payload: Option<String>,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input to the account linker.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub identity: NormalizedIdentity,
    pub link_type: LinkType,
    pub payload: Option<String>,
    /// When set, the link is attached to this existing user instead of
    /// resolving to a synthetic one
    pub caller_user_id: Option<String>,
}

/// Pre-generated ids handed to the storage layer so id generation stays
/// outside the transaction.
#[derive(Debug, Clone)]
pub(crate) struct FreshIds {
    pub(crate) user_id: String,
    pub(crate) link_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_link_serializes_without_surprises() {
        let link = AccountLink {
            id: "l1".to_string(),
            user_id: "u1".to_string(),
            provider: "gog".to_string(),
            provider_account_id: "48628349".to_string(),
            link_type: LinkType::Credentials.as_str().to_string(),
            payload: None,
            display_name: "gogger".to_string(),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&link).expect("link should serialize");
        assert_eq!(json["provider"], "gog");
        assert_eq!(json["link_type"], "credentials");
    }
}
