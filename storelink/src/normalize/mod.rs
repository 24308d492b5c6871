//! Credential normalizer: per-provider adapters that turn a raw credential
//! payload into one normalized identity tuple, or fail with a taxonomy
//! error the caller can act on.

mod adapters;
mod errors;
mod types;

pub use errors::NormalizeError;
pub use types::{NormalizedIdentity, ProviderProfile};

use std::collections::HashMap;

use crate::registry::{self, STEAM_PROVIDER};

/// Turn a provider-specific credential payload into a normalized identity.
///
/// Required fields are checked against the provider registry first; a
/// missing or empty field fails `InvalidCredentials` without any network
/// call. Normalization mutates no local state.
pub async fn normalize_credentials(
    provider: &str,
    fields: &HashMap<String, String>,
) -> Result<NormalizedIdentity, NormalizeError> {
    let descriptor = registry::descriptor(provider).ok_or_else(|| {
        NormalizeError::InvalidCredentials(format!("Unknown provider: {provider}"))
    })?;

    for field in descriptor.required_fields {
        match fields.get(*field) {
            Some(value) if !value.trim().is_empty() => {}
            _ => {
                return Err(NormalizeError::InvalidCredentials(format!(
                    "Missing credential field: {field}"
                )));
            }
        }
    }

    let profile = match descriptor.id {
        STEAM_PROVIDER => adapters::steam::profile_from_steam_id(&fields["steamid"]).await?,
        "epic" => adapters::epic::fetch_profile(&fields["access_token"]).await?,
        "gog" => adapters::gog::fetch_profile(&fields["access_token"]).await?,
        "itchio" => adapters::itchio::fetch_profile(&fields["access_token"]).await?,
        "origin" => adapters::origin::fetch_profile(&fields["access_token"]).await?,
        "rockstar" => {
            adapters::rockstar::ticket_login(
                &fields["email"],
                &fields["password"],
                fields.get("code").map(String::as_str),
            )
            .await?
        }
        "ubisoft" => {
            adapters::ubisoft::session_login(
                &fields["email"],
                &fields["password"],
                fields.get("code").map(String::as_str),
            )
            .await?
        }
        "discord" | "google" | "battlenet" => {
            adapters::authcode::exchange_and_fetch(descriptor.id, &fields["code"]).await?
        }
        other => {
            return Err(NormalizeError::InvalidCredentials(format!(
                "No adapter for provider: {other}"
            )));
        }
    };

    Ok(profile.into_identity())
}
