//! GOG adapter: bearer-token lookup against the embed userData endpoint.

use serde::Deserialize;
use std::env;
use std::sync::LazyLock;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

static GOG_PROFILE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GOG_PROFILE_URL").unwrap_or_else(|_| "https://embed.gog.com/userData.json".to_string())
});

#[derive(Debug, Deserialize)]
struct GogUserData {
    #[serde(rename = "userId")]
    user_id: String,
    username: String,
    avatar: Option<String>,
}

pub(in crate::normalize) async fn fetch_profile(
    access_token: &str,
) -> Result<ProviderProfile, NormalizeError> {
    let response = get_client()
        .get(GOG_PROFILE_URL.as_str())
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(NormalizeError::ProviderUnavailable(
            response.status().to_string(),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    let data: GogUserData = serde_json::from_str(&body)
        .map_err(|e| NormalizeError::InvalidProfile(format!("GOG userData: {e}")))?;

    Ok(ProviderProfile::Gog {
        user_id: data.user_id,
        username: data.username,
        avatar: data.avatar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gog_userdata_deserialization() {
        let body = r#"{
            "userId": "48628349",
            "username": "gogger",
            "avatar": "https://images.gog.com/abc",
            "country": "US"
        }"#;

        let data: GogUserData = serde_json::from_str(body).expect("userData should deserialize");
        assert_eq!(data.user_id, "48628349");
        assert_eq!(data.username, "gogger");
        assert!(data.avatar.is_some());
    }

    #[test]
    fn test_gog_userdata_without_avatar() {
        let body = r#"{"userId": "48628349", "username": "gogger"}"#;
        let data: GogUserData = serde_json::from_str(body).expect("userData should deserialize");
        assert!(data.avatar.is_none());
    }
}
