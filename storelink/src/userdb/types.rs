use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canonical local identity. Created only by the account linker on first
/// sign-in from any provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Stable account key: a namespaced synthetic key (`provider:id`) for
    /// providers without a usable address, or a provider-supplied email
    pub account: String,
    /// Display name shown in the client
    pub label: String,
    /// Avatar URL, when the provider supplied one
    pub picture: Option<String>,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, account: String, label: String, picture: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            account,
            label,
            picture,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// Test that a new user carries the given identity fields and fresh,
    /// equal timestamps
    #[test]
    fn test_user_new() {
        // Given user information
        let id = "user123".to_string();
        let account = "steam-credentials:76561198000000000".to_string();
        let label = "Test User".to_string();

        // When creating a new user
        let user = User::new(id.clone(), account.clone(), label.clone(), None);

        // Then the user should have the correct properties
        assert_eq!(user.id, id);
        assert_eq!(user.account, account);
        assert_eq!(user.label, label);
        assert_eq!(user.picture, None);

        // And created_at and updated_at should be within the last second
        let one_second_ago = Utc::now() - Duration::seconds(1);
        assert!(user.created_at > one_second_ago);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_user_serde_roundtrip() {
        let user = User::new(
            "user123".to_string(),
            "gog:1234".to_string(),
            "Someone".to_string(),
            Some("https://images.gog.com/avatar.png".to_string()),
        );

        let serialized = serde_json::to_string(&user).expect("Failed to serialize");
        let deserialized: User = serde_json::from_str(&serialized).expect("Failed to deserialize");

        assert_eq!(user.id, deserialized.id);
        assert_eq!(user.account, deserialized.account);
        assert_eq!(user.label, deserialized.label);
        assert_eq!(user.picture, deserialized.picture);
    }
}
