//! Ubisoft adapter: session login with email and password against the
//! Ubi profile-sessions endpoint. Like Rockstar, the provider may demand
//! a second factor mid-login.

use http::StatusCode;
use serde::Deserialize;
use std::env;
use std::sync::LazyLock;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

static UBISOFT_SESSION_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("UBISOFT_SESSION_URL")
        .unwrap_or_else(|_| "https://public-ubiservices.ubi.com/v3/profiles/sessions".to_string())
});

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "profileId")]
    profile_id: Option<String>,
    #[serde(rename = "nameOnPlatform")]
    name_on_platform: Option<String>,
    /// Present when the account needs a second factor to finish login
    #[serde(rename = "twoFactorAuthenticationTicket")]
    two_factor_ticket: Option<String>,
}

pub(in crate::normalize) async fn session_login(
    email: &str,
    password: &str,
    code: Option<&str>,
) -> Result<ProviderProfile, NormalizeError> {
    let mut form = vec![("email", email), ("password", password)];
    if let Some(code) = code {
        form.push(("code", code));
    }

    let response = get_client()
        .post(UBISOFT_SESSION_URL.as_str())
        .form(&form)
        .send()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    let status = response.status();

    if status == StatusCode::CONFLICT {
        return Err(NormalizeError::TwoFactorRequired);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(NormalizeError::InvalidCredentials(
            "Ubisoft rejected the email/password pair".to_string(),
        ));
    }

    if !status.is_success() {
        return Err(NormalizeError::ProviderUnavailable(status.to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    parse_session_body(&body)
}

fn parse_session_body(body: &str) -> Result<ProviderProfile, NormalizeError> {
    let session: SessionResponse = serde_json::from_str(body)
        .map_err(|e| NormalizeError::InvalidProfile(format!("Ubisoft session: {e}")))?;

    if session.two_factor_ticket.is_some() {
        return Err(NormalizeError::TwoFactorRequired);
    }

    let profile_id = session.profile_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        NormalizeError::InvalidProfile("Session response carried no profileId".to_string())
    })?;

    Ok(ProviderProfile::Ubisoft {
        name_on_platform: session
            .name_on_platform
            .unwrap_or_else(|| profile_id.clone()),
        profile_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_body_success() {
        let body = r#"{
            "profileId": "f1c5c37e-2b15-4d04-9a3b-0c5c37e2b154",
            "nameOnPlatform": "ubi_player",
            "ticket": "ew0..."
        }"#;

        let profile = parse_session_body(body).expect("session body should parse");
        assert_eq!(
            profile,
            ProviderProfile::Ubisoft {
                profile_id: "f1c5c37e-2b15-4d04-9a3b-0c5c37e2b154".to_string(),
                name_on_platform: "ubi_player".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_session_body_two_factor_ticket() {
        let body = r#"{"twoFactorAuthenticationTicket": "2fa-ticket"}"#;
        let result = parse_session_body(body);
        assert!(matches!(result, Err(NormalizeError::TwoFactorRequired)));
    }

    #[test]
    fn test_parse_session_body_missing_profile_id() {
        let body = r#"{"nameOnPlatform": "ubi_player"}"#;
        let result = parse_session_body(body);
        assert!(matches!(result, Err(NormalizeError::InvalidProfile(_))));
    }

    #[test]
    fn test_parse_session_body_malformed_fails() {
        let result = parse_session_body("not json");
        assert!(matches!(result, Err(NormalizeError::InvalidProfile(_))));
    }

    #[test]
    fn test_name_falls_back_to_profile_id() {
        let body = r#"{"profileId": "f1c5c37e"}"#;
        let profile = parse_session_body(body).expect("session body should parse");
        assert_eq!(
            profile,
            ProviderProfile::Ubisoft {
                profile_id: "f1c5c37e".to_string(),
                name_on_platform: "f1c5c37e".to_string(),
            }
        );
    }
}
