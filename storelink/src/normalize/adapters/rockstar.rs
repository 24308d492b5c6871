//! Rockstar adapter: ticket-based login with email and password. The
//! provider may demand a second factor; that is surfaced as a distinct,
//! user-actionable error instead of a generic failure.

use http::StatusCode;
use serde::Deserialize;
use std::env;
use std::sync::LazyLock;

use crate::client::get_client;
use crate::normalize::errors::NormalizeError;
use crate::normalize::types::ProviderProfile;

static ROCKSTAR_TICKET_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("ROCKSTAR_TICKET_URL")
        .unwrap_or_else(|_| "https://socialclub.rockstargames.com/api/login/ticket".to_string())
});

#[derive(Debug, Deserialize)]
struct TicketResponse {
    #[serde(rename = "RockstarId")]
    rockstar_id: Option<String>,
    #[serde(rename = "Nickname")]
    nickname: Option<String>,
    #[serde(rename = "TwoFactorRequired", default)]
    two_factor_required: bool,
}

pub(in crate::normalize) async fn ticket_login(
    email: &str,
    password: &str,
    code: Option<&str>,
) -> Result<ProviderProfile, NormalizeError> {
    let mut form = vec![("email", email), ("password", password)];
    if let Some(code) = code {
        form.push(("code", code));
    }

    let response = get_client()
        .post(ROCKSTAR_TICKET_URL.as_str())
        .form(&form)
        .send()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    let status = response.status();

    // 409 is the provider's out-of-band signal that a second factor is
    // pending for this account
    if status == StatusCode::CONFLICT {
        return Err(NormalizeError::TwoFactorRequired);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(NormalizeError::InvalidCredentials(
            "Rockstar rejected the email/password pair".to_string(),
        ));
    }

    if !status.is_success() {
        return Err(NormalizeError::ProviderUnavailable(status.to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| NormalizeError::ProviderUnavailable(e.to_string()))?;

    parse_ticket_body(&body)
}

/// Maps a successful ticket response body to a profile, honoring the
/// in-body second-factor flag some gateway versions use instead of 409.
fn parse_ticket_body(body: &str) -> Result<ProviderProfile, NormalizeError> {
    let ticket: TicketResponse = serde_json::from_str(body)
        .map_err(|e| NormalizeError::InvalidProfile(format!("Ticket response: {e}")))?;

    if ticket.two_factor_required {
        return Err(NormalizeError::TwoFactorRequired);
    }

    let rockstar_id = ticket.rockstar_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        NormalizeError::InvalidProfile("Ticket response carried no RockstarId".to_string())
    })?;

    Ok(ProviderProfile::Rockstar {
        nickname: ticket.nickname.unwrap_or_else(|| rockstar_id.clone()),
        rockstar_id,
    })
}
