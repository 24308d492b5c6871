//! steam-credentials adapter: the completion leg of the delegated Steam
//! sign-in. The id itself was already verified by the delegated-auth
//! round-trip; this adapter re-validates its format and enriches the
//! profile through the Steam Web API when a key is configured.

use serde::Deserialize;
use std::env;
use std::sync::LazyLock;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

static STEAM_API_KEY: LazyLock<String> =
    LazyLock::new(|| env::var("STEAM_API_KEY").unwrap_or_default());

static STEAM_PLAYER_SUMMARY_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("STEAM_PLAYER_SUMMARY_URL").unwrap_or_else(|_| {
        "https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002/".to_string()
    })
});

/// A SteamID64 is exactly 17 decimal digits
pub(crate) fn is_valid_steam_id(id: &str) -> bool {
    id.len() == 17 && id.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Deserialize)]
struct PlayerSummaryResponse {
    response: PlayerList,
}

#[derive(Debug, Deserialize)]
struct PlayerList {
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    steamid: String,
    personaname: String,
    avatarfull: Option<String>,
}

pub(in crate::normalize) async fn profile_from_steam_id(
    steam_id: &str,
) -> Result<ProviderProfile, NormalizeError> {
    if !is_valid_steam_id(steam_id) {
        return Err(NormalizeError::InvalidCredentials(format!(
            "Malformed SteamID64: {steam_id}"
        )));
    }

    // Identity comes from the verified id; the persona lookup only supplies
    // display metadata, and is skipped entirely when no API key is set.
    if STEAM_API_KEY.is_empty() {
        return Ok(ProviderProfile::Steam {
            steam_id: steam_id.to_string(),
            persona_name: "Steam user".to_string(),
            avatar: None,
        });
    }

    let response = get_client()
        .get(STEAM_PLAYER_SUMMARY_URL.as_str())
        .query(&[("key", STEAM_API_KEY.as_str()), ("steamids", steam_id)])
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

    let summary: PlayerSummaryResponse = serde_json::from_str(&body)
        .map_err(|e| NormalizeError::InvalidProfile(format!("Player summary: {e}")))?;

    let player = summary
        .response
        .players
        .into_iter()
        .find(|p| p.steamid == steam_id)
        .ok_or_else(|| {
            NormalizeError::InvalidProfile(format!("No player summary for {steam_id}"))
        })?;

    Ok(ProviderProfile::Steam {
        steam_id: player.steamid,
        persona_name: player.personaname,
        avatar: player.avatarfull,
    })
}
