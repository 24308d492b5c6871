//! itch.io adapter: API-key profile lookup against the key/me endpoint.

use serde::Deserialize;
use std::env;
use std::sync::LazyLock;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

static ITCHIO_PROFILE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("ITCHIO_PROFILE_URL").unwrap_or_else(|_| "https://itch.io/api/1/key/me".to_string())
});

#[derive(Debug, Deserialize)]
struct ItchioMeResponse {
    user: ItchioUser,
}

#[derive(Debug, Deserialize)]
struct ItchioUser {
    id: u64,
    username: String,
    cover_url: Option<String>,
}

pub(in crate::normalize) async fn fetch_profile(
    access_token: &str,
) -> Result<ProviderProfile, NormalizeError> {
    let response = get_client()
        .get(ITCHIO_PROFILE_URL.as_str())
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

    parse_me_body(&body)
}

fn parse_me_body(body: &str) -> Result<ProviderProfile, NormalizeError> {
    let me: ItchioMeResponse = serde_json::from_str(body)
        .map_err(|e| NormalizeError::InvalidProfile(format!("itch.io me: {e}")))?;

    Ok(ProviderProfile::Itchio {
        user_id: me.user.id.to_string(),
        username: me.user.username,
        cover_url: me.user.cover_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_me_body() {
        let body = r#"{
            "user": {
                "id": 29789,
                "username": "leafo",
                "cover_url": "https://img.itch.zone/abc.png",
                "gamer": true
            }
        }"#;

        let profile = parse_me_body(body).expect("me response should parse");
        assert_eq!(
            profile,
            ProviderProfile::Itchio {
                user_id: "29789".to_string(),
                username: "leafo".to_string(),
                cover_url: Some("https://img.itch.zone/abc.png".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_me_body_without_cover() {
        let body = r#"{"user": {"id": 29789, "username": "leafo"}}"#;
        let profile = parse_me_body(body).expect("me response should parse");
        assert!(matches!(
            profile,
            ProviderProfile::Itchio { cover_url: None, .. }
        ));
    }

    #[test]
    fn test_parse_me_body_missing_user_fails() {
        let result = parse_me_body(r#"{"errors": ["invalid key"]}"#);
        assert!(matches!(result, Err(NormalizeError::InvalidProfile(_))));
    }
}
