use std::collections::HashMap;

use http::header::HeaderMap;

use crate::delegated::{
    DELEGATED_COMPLETE_ROUTE, DELEGATED_ERROR_ROUTE, verify_callback,
};
use crate::linking::{ResolveRequest, resolve_link};
use crate::normalize::{NormalizeError, normalize_credentials};
use crate::registry::{ProviderKind, descriptor};
use crate::session::{
    SessionError, SessionSnapshot, get_session_token_from_headers, mint_session_with_token,
    read_session,
};

use super::errors::FederationError;

/// Sign a user in with provider credentials.
///
/// Normalizes the credentials, resolves them to a canonical user through
/// the account linker, and mints a fresh session. When `caller_user_id`
/// is set (an already-authenticated caller), a new external account is
/// attached to that user instead of resolving to a synthetic one.
pub async fn signin_core(
    provider: &str,
    fields: &HashMap<String, String>,
    caller_user_id: Option<String>,
) -> Result<(HeaderMap, SessionSnapshot), FederationError> {
    let desc = descriptor(provider).ok_or_else(|| {
        FederationError::Normalize(NormalizeError::InvalidCredentials(format!(
            "Unknown provider: {provider}"
        )))
    })?;

    let identity = normalize_credentials(provider, fields).await?;

    // Bearer tokens are retained with the link so later profile refreshes
    // can reuse them
    let payload = match desc.kind {
        ProviderKind::BearerToken => fields.get("access_token").cloned(),
        _ => None,
    };

    let request = ResolveRequest {
        identity,
        link_type: desc.link_type,
        payload,
        caller_user_id,
    };

    let user = resolve_link(&request).await?;

    tracing::info!(user_id = %user.id, provider = %provider, "Signed in");

    let (headers, token) = mint_session_with_token(&user.id).await?;
    let snapshot = read_session(&token).await?;

    Ok((headers, snapshot))
}

/// Read the current session from request headers.
///
/// A missing, malformed, or expired token reads as an anonymous snapshot;
/// only storage failures surface as errors. The response shape is always
/// well-formed so clients never need a special case.
pub async fn session_read_core(headers: &HeaderMap) -> Result<SessionSnapshot, FederationError> {
    let Some(token) = get_session_token_from_headers(headers)? else {
        return Ok(SessionSnapshot::anonymous());
    };

    match read_session(&token).await {
        Ok(snapshot) => Ok(snapshot),
        Err(SessionError::Expired) | Err(SessionError::Token(_)) | Err(SessionError::NoSession) => {
            Ok(SessionSnapshot::anonymous())
        }
        Err(err) => Err(FederationError::Session(err).log()),
    }
}

/// Turn a delegated-auth callback into the frontend redirect target.
///
/// Every outcome is a redirect: success carries the verified SteamID64 to
/// the completion route, any failure carries a stable error code to the
/// error route.
pub async fn callback_redirect_core(params: &HashMap<String, String>) -> String {
    match verify_callback(params).await {
        Ok(steam_id) => {
            tracing::info!(steam_id = %steam_id, "Delegated auth verified");
            format!(
                "{}?steamId={}",
                DELEGATED_COMPLETE_ROUTE.as_str(),
                urlencoding::encode(&steam_id)
            )
        }
        Err(err) => {
            tracing::warn!("Delegated auth callback failed: {}", err);
            format!(
                "{}?error={}",
                DELEGATED_ERROR_ROUTE.as_str(),
                err.error_code()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unknown providers fail before touching storage or the network
    #[tokio::test]
    async fn test_signin_unknown_provider() {
        let result = signin_core("itch", &HashMap::new(), None).await;
        assert!(matches!(
            result,
            Err(FederationError::Normalize(
                NormalizeError::InvalidCredentials(_)
            ))
        ));
    }

    /// No cookie header reads as anonymous, not as an error
    #[tokio::test]
    async fn test_session_read_without_cookie_is_anonymous() {
        let snapshot = session_read_core(&HeaderMap::new())
            .await
            .expect("missing cookie should not error");
        assert!(!snapshot.authenticated);
    }

    /// A garbage token reads as anonymous, not as an error
    #[tokio::test]
    async fn test_session_read_with_garbage_token_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            format!("{}=garbage", crate::session::SESSION_COOKIE_NAME.as_str())
                .parse()
                .expect("cookie header should build"),
        );

        let snapshot = session_read_core(&headers)
            .await
            .expect("garbage token should not error");
        assert!(!snapshot.authenticated);
    }

    /// An incomplete callback redirects to the error route with a code
    #[tokio::test]
    async fn test_callback_without_params_redirects_to_error() {
        let target = callback_redirect_core(&HashMap::new()).await;
        assert!(target.starts_with(DELEGATED_ERROR_ROUTE.as_str()));
        assert!(target.contains("error=missing_parameter"));
    }
}
