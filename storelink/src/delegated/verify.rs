use std::collections::HashMap;

use url::Url;

use crate::client::get_client;

use super::config::{DELEGATED_RETURN_URL, STEAM_OPENID_ENDPOINT};
use super::errors::DelegatedError;

const OPENID_NS: &str = "http://specs.openid.net/auth/2.0";
const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";

const STEAM_ID_PREFIX_HTTPS: &str = "https://steamcommunity.com/openid/id/";
const STEAM_ID_PREFIX_HTTP: &str = "http://steamcommunity.com/openid/id/";

/// Build the URL the browser is redirected to for Steam sign-in.
pub fn build_authorize_url() -> Result<String, DelegatedError> {
    let return_to = DELEGATED_RETURN_URL.as_str();
    let realm = realm_of(return_to)?;

    let mut url = Url::parse(STEAM_OPENID_ENDPOINT.as_str())
        .map_err(|e| DelegatedError::ProviderUnavailable(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("openid.ns", OPENID_NS)
        .append_pair("openid.mode", "checkid_setup")
        .append_pair("openid.return_to", return_to)
        .append_pair("openid.realm", &realm)
        .append_pair("openid.identity", IDENTIFIER_SELECT)
        .append_pair("openid.claimed_id", IDENTIFIER_SELECT);

    Ok(url.into())
}

/// The realm is the origin of the return URL
fn realm_of(return_to: &str) -> Result<String, DelegatedError> {
    let url =
        Url::parse(return_to).map_err(|e| DelegatedError::InvalidClaimedId(e.to_string()))?;
    Ok(url.origin().ascii_serialization())
}

/// Verify a callback from Steam and extract the SteamID64.
///
/// The full set of `openid.*` parameters is posted back to the provider
/// with the mode overridden to `check_authentication`; only a literal
/// `is_valid:true` line in the response confirms the assertion.
pub async fn verify_callback(
    params: &HashMap<String, String>,
) -> Result<String, DelegatedError> {
    for required in [
        "openid.claimed_id",
        "openid.sig",
        "openid.signed",
        "openid.assoc_handle",
    ] {
        if !params.contains_key(required) {
            return Err(DelegatedError::MissingParameter(required.to_string()));
        }
    }

    let mut form: Vec<(&str, &str)> = params
        .iter()
        .filter(|(k, _)| k.starts_with("openid."))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    form.retain(|(k, _)| *k != "openid.mode");
    form.push(("openid.mode", "check_authentication"));

    let response = get_client()
        .post(STEAM_OPENID_ENDPOINT.as_str())
        .form(&form)
        .send()
        .await
        .map_err(|e| DelegatedError::ProviderUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DelegatedError::ProviderUnavailable(
            response.status().to_string(),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| DelegatedError::ProviderUnavailable(e.to_string()))?;

    if !response_is_valid(&body) {
        return Err(DelegatedError::VerificationFailed);
    }

    parse_claimed_id(&params["openid.claimed_id"])
}

/// The key-value response confirms the assertion only with a literal
/// `is_valid:true` line.
fn response_is_valid(body: &str) -> bool {
    body.lines().any(|line| line.trim() == "is_valid:true")
}

/// Extract the SteamID64 from a claimed_id URL, rejecting anything that
/// is not the community identity prefix followed by exactly 17 digits.
fn parse_claimed_id(claimed_id: &str) -> Result<String, DelegatedError> {
    let id = claimed_id
        .strip_prefix(STEAM_ID_PREFIX_HTTPS)
        .or_else(|| claimed_id.strip_prefix(STEAM_ID_PREFIX_HTTP))
        .ok_or_else(|| DelegatedError::InvalidClaimedId(claimed_id.to_string()))?;

    if id.len() == 17 && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(id.to_string())
    } else {
        Err(DelegatedError::InvalidClaimedId(claimed_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_carries_openid_params() {
        let url = build_authorize_url().expect("authorize URL should build");
        let parsed = Url::parse(&url).expect("authorize URL should parse");
        let pairs: HashMap<_, _> = parsed.query_pairs().into_owned().collect();

        assert_eq!(pairs["openid.ns"], OPENID_NS);
        assert_eq!(pairs["openid.mode"], "checkid_setup");
        assert_eq!(pairs["openid.identity"], IDENTIFIER_SELECT);
        assert_eq!(pairs["openid.claimed_id"], IDENTIFIER_SELECT);
        assert!(pairs["openid.return_to"].ends_with("/steam/authorized"));
    }

    #[test]
    fn test_realm_is_origin_of_return_url() {
        let realm = realm_of("http://localhost:3001/auth/steam/authorized")
            .expect("realm should derive");
        assert_eq!(realm, "http://localhost:3001");
    }

    #[test]
    fn test_response_is_valid_exact_marker() {
        assert!(response_is_valid("ns:http://specs.openid.net/auth/2.0\nis_valid:true\n"));
        assert!(response_is_valid("is_valid:true"));
    }

    #[test]
    fn test_response_is_valid_rejects_false_and_lookalikes() {
        assert!(!response_is_valid("is_valid:false"));
        assert!(!response_is_valid("is_valid:truex"));
        assert!(!response_is_valid("xis_valid:true"));
        assert!(!response_is_valid(""));
    }

    #[test]
    fn test_parse_claimed_id_https() {
        let id = parse_claimed_id("https://steamcommunity.com/openid/id/76561198000000000")
            .expect("https claimed_id should parse");
        assert_eq!(id, "76561198000000000");
    }

    #[test]
    fn test_parse_claimed_id_http_fallback() {
        let id = parse_claimed_id("http://steamcommunity.com/openid/id/76561198000000000")
            .expect("http claimed_id should parse");
        assert_eq!(id, "76561198000000000");
    }

    #[test]
    fn test_parse_claimed_id_rejects_foreign_hosts() {
        let result = parse_claimed_id("https://example.com/openid/id/76561198000000000");
        assert!(matches!(result, Err(DelegatedError::InvalidClaimedId(_))));
    }

    #[test]
    fn test_parse_claimed_id_rejects_malformed_ids() {
        for claimed in [
            "https://steamcommunity.com/openid/id/",
            "https://steamcommunity.com/openid/id/abc",
            "https://steamcommunity.com/openid/id/7656119800000000",
            "https://steamcommunity.com/openid/id/765611980000000000",
            "https://steamcommunity.com/openid/id/76561198000000000/extra",
        ] {
            let result = parse_claimed_id(claimed);
            assert!(
                matches!(result, Err(DelegatedError::InvalidClaimedId(_))),
                "{claimed} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_verify_callback_requires_signature_params() {
        let mut params = HashMap::new();
        params.insert(
            "openid.claimed_id".to_string(),
            "https://steamcommunity.com/openid/id/76561198000000000".to_string(),
        );

        let result = verify_callback(&params).await;
        assert!(matches!(result, Err(DelegatedError::MissingParameter(_))));
    }
}
