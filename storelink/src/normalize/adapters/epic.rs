//! Epic adapter: bearer-token profile lookup against the Epic account
//! userinfo endpoint.

use serde::Deserialize;
use std::env;
use std::sync::LazyLock;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

static EPIC_PROFILE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("EPIC_PROFILE_URL")
        .unwrap_or_else(|_| "https://api.epicgames.dev/epic/oauth/v2/userInfo".to_string())
});

#[derive(Debug, Deserialize)]
struct EpicUserInfo {
    /// Stable Epic account id
    sub: String,
    preferred_username: String,
}

pub(in crate::normalize) async fn fetch_profile(
    access_token: &str,
) -> Result<ProviderProfile, NormalizeError> {
    let response = get_client()
        .get(EPIC_PROFILE_URL.as_str())
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

    let info: EpicUserInfo = serde_json::from_str(&body)
        .map_err(|e| NormalizeError::InvalidProfile(format!("Epic userinfo: {e}")))?;

    Ok(ProviderProfile::Epic {
        account_id: info.sub,
        display_name: info.preferred_username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epic_userinfo_deserialization() {
        let body = r#"{
            "sub": "f9d1b0c2a4e84b6f8f0f3c1d2e3a4b5c",
            "preferred_username": "EpicGamer",
            "aud": "client-id"
        }"#;

        let info: EpicUserInfo = serde_json::from_str(body).expect("userinfo should deserialize");
        assert_eq!(info.sub, "f9d1b0c2a4e84b6f8f0f3c1d2e3a4b5c");
        assert_eq!(info.preferred_username, "EpicGamer");
    }

    #[test]
    fn test_epic_userinfo_missing_sub_fails() {
        let body = r#"{"preferred_username": "EpicGamer"}"#;
        let info: Result<EpicUserInfo, _> = serde_json::from_str(body);
        assert!(info.is_err());
    }
}
