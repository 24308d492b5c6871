//! Authorization-code adapter shared by Discord and Google: exchange the
//! one-time code for an access token, then fetch the provider profile
//! with it.

use serde::Deserialize;
use std::env;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

struct Endpoints {
    token_url: String,
    profile_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

fn endpoints_for(provider: &str) -> Result<Endpoints, NormalizeError> {
    let (token_default, profile_default) = match provider {
        "discord" => (
            "https://discord.com/api/oauth2/token",
            "https://discord.com/api/users/@me",
        ),
        "google" => (
            "https://oauth2.googleapis.com/token",
            "https://openidconnect.googleapis.com/v1/userinfo",
        ),
        "battlenet" => (
            "https://oauth.battle.net/token",
            "https://oauth.battle.net/userinfo",
        ),
        other => {
            return Err(NormalizeError::InvalidCredentials(format!(
                "No authorization-code endpoints for provider: {other}"
            )));
        }
    };

    let upper = provider.to_uppercase();
    let require = |suffix: &str| {
        env::var(format!("{upper}_{suffix}")).map_err(|_| {
            NormalizeError::InvalidCredentials(format!("{upper}_{suffix} must be set"))
        })
    };

    Ok(Endpoints {
        token_url: env::var(format!("{upper}_TOKEN_URL"))
            .unwrap_or_else(|_| token_default.to_string()),
        profile_url: env::var(format!("{upper}_PROFILE_URL"))
            .unwrap_or_else(|_| profile_default.to_string()),
        client_id: require("CLIENT_ID")?,
        client_secret: require("CLIENT_SECRET")?,
        redirect_uri: require("REDIRECT_URI")?,
    })
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: String,
    picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BattlenetUserInfo {
    sub: String,
    battletag: String,
}

pub(in crate::normalize) async fn exchange_and_fetch(
    provider: &str,
    code: &str,
) -> Result<ProviderProfile, NormalizeError> {
    let endpoints = endpoints_for(provider)?;
    let access_token = exchange_code(&endpoints, code).await?;
    let body = fetch_profile_body(&endpoints, &access_token).await?;
    parse_profile(provider, &body)
}

async fn exchange_code(endpoints: &Endpoints, code: &str) -> Result<String, NormalizeError> {
    let params = [
        ("code", code),
        ("client_id", endpoints.client_id.as_str()),
        ("client_secret", endpoints.client_secret.as_str()),
        ("redirect_uri", endpoints.redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let response = get_client()
        .post(&endpoints.token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    let status = response.status();

    // 4xx from the token endpoint means the code itself was bad (expired,
    // already redeemed, wrong redirect_uri), not a provider outage
    if status.is_client_error() {
        return Err(NormalizeError::InvalidCredentials(format!(
            "Code exchange rejected: {status}"
        )));
    }
    if !status.is_success() {
        return Err(NormalizeError::ProviderUnavailable(status.to_string()));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| NormalizeError::InvalidProfile(format!("Token response: {e}")))?;

    Ok(token.access_token)
}

async fn fetch_profile_body(
    endpoints: &Endpoints,
    access_token: &str,
) -> Result<String, NormalizeError> {
    let response = get_client()
        .get(&endpoints.profile_url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(NormalizeError::ProviderUnavailable(
            response.status().to_string(),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))
}

fn parse_profile(provider: &str, body: &str) -> Result<ProviderProfile, NormalizeError> {
    match provider {
        "discord" => {
            let user: DiscordUser = serde_json::from_str(body)
                .map_err(|e| NormalizeError::InvalidProfile(format!("Discord user: {e}")))?;
            let avatar = user
                .avatar
                .map(|hash| format!("https://cdn.discordapp.com/avatars/{}/{hash}.png", user.id));
            Ok(ProviderProfile::Discord {
                id: user.id,
                username: user.username,
                avatar,
            })
        }
        "google" => {
            let info: GoogleUserInfo = serde_json::from_str(body)
                .map_err(|e| NormalizeError::InvalidProfile(format!("Google userinfo: {e}")))?;
            Ok(ProviderProfile::Google {
                sub: info.sub,
                name: info.name,
                picture: info.picture,
            })
        }
        "battlenet" => {
            let info: BattlenetUserInfo = serde_json::from_str(body)
                .map_err(|e| NormalizeError::InvalidProfile(format!("Battle.net userinfo: {e}")))?;
            Ok(ProviderProfile::Battlenet {
                sub: info.sub,
                battletag: info.battletag,
            })
        }
        other => Err(NormalizeError::InvalidCredentials(format!(
            "No profile parser for provider: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discord_profile() {
        let body = r#"{"id": "80351110224678912", "username": "nelly", "avatar": "8342729096ea3675442027381ff50dfe"}"#;
        let profile = parse_profile("discord", body).expect("Discord user should parse");

        assert_eq!(
            profile,
            ProviderProfile::Discord {
                id: "80351110224678912".to_string(),
                username: "nelly".to_string(),
                avatar: Some(
                    "https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png"
                        .to_string()
                ),
            }
        );
    }

    #[test]
    fn test_parse_discord_profile_without_avatar() {
        let body = r#"{"id": "80351110224678912", "username": "nelly", "avatar": null}"#;
        let profile = parse_profile("discord", body).expect("Discord user should parse");
        assert!(matches!(
            profile,
            ProviderProfile::Discord { avatar: None, .. }
        ));
    }

    #[test]
    fn test_parse_google_profile() {
        let body = r#"{"sub": "10769150350006150715113082367", "name": "Jan Tester", "picture": "https://lh3.googleusercontent.com/a/x"}"#;
        let profile = parse_profile("google", body).expect("Google userinfo should parse");

        assert_eq!(
            profile,
            ProviderProfile::Google {
                sub: "10769150350006150715113082367".to_string(),
                name: "Jan Tester".to_string(),
                picture: Some("https://lh3.googleusercontent.com/a/x".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_battlenet_profile() {
        let body = r#"{"sub": "123456789", "id": 123456789, "battletag": "Player#1234"}"#;
        let profile = parse_profile("battlenet", body).expect("Battle.net userinfo should parse");

        assert_eq!(
            profile,
            ProviderProfile::Battlenet {
                sub: "123456789".to_string(),
                battletag: "Player#1234".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_malformed_profile_fails() {
        let result = parse_profile("google", "not json");
        assert!(matches!(result, Err(NormalizeError::InvalidProfile(_))));
    }

    #[test]
    fn test_unknown_provider_has_no_endpoints() {
        let result = endpoints_for("itch");
        assert!(matches!(result, Err(NormalizeError::InvalidCredentials(_))));
    }
}
