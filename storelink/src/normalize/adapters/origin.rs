//! Origin/EA adapter: bearer-token identity lookup against the EA
//! identity gateway. The numeric pid is the stable account id; the
//! persona falls back to the account email when no display name is set.

use serde::Deserialize;
use std::env;
use std::sync::LazyLock;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

static ORIGIN_PROFILE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("ORIGIN_PROFILE_URL")
        .unwrap_or_else(|_| "https://gateway.ea.com/proxy/identity/pids/me".to_string())
});

#[derive(Debug, Deserialize)]
struct PidResponse {
    pid: Pid,
}

#[derive(Debug, Deserialize)]
struct Pid {
    #[serde(rename = "pidId")]
    pid_id: u64,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    email: Option<String>,
}

pub(in crate::normalize) async fn fetch_profile(
    access_token: &str,
) -> Result<ProviderProfile, NormalizeError> {
    let response = get_client()
        .get(ORIGIN_PROFILE_URL.as_str())
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

    parse_pid_body(&body)
}

fn parse_pid_body(body: &str) -> Result<ProviderProfile, NormalizeError> {
    let response: PidResponse = serde_json::from_str(body)
        .map_err(|e| NormalizeError::InvalidProfile(format!("EA pid: {e}")))?;

    let pid = response.pid.pid_id.to_string();
    let persona = response
        .pid
        .display_name
        .or(response.pid.email)
        .unwrap_or_else(|| pid.clone());

    Ok(ProviderProfile::Origin { pid, persona })
}
