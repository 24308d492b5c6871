//! Stateless session layer. The signed token is the only session state;
//! there is no server-side session table and nothing to revoke. Reads
//! reload the linked-account set from storage, so link and unlink
//! operations are visible on the next read without re-issuing tokens.

mod config;
mod errors;
mod token;
mod types;

pub use config::SESSION_COOKIE_NAME;
pub use errors::SessionError;
pub use types::{LinkedAccount, SessionSnapshot, SessionUser};

use chrono::{DateTime, Duration, Utc};
use http::header::{COOKIE, HeaderMap};

use crate::linking::AccountLinkStore;
use crate::userdb::UserStore;
use crate::utils::header_set_cookie;

use config::SESSION_TOKEN_TTL;
use token::{sign_claims, verify_token};
use types::{SessionClaims, project_steam_id};

/// Mint a session token for a user and return the `Set-Cookie` headers
/// carrying it. The linked-account set is loaded fresh at mint time.
pub async fn mint_session(user_id: &str) -> Result<HeaderMap, SessionError> {
    let (headers, _token) = mint_session_with_token(user_id).await?;
    Ok(headers)
}

pub(crate) async fn mint_session_with_token(
    user_id: &str,
) -> Result<(HeaderMap, String), SessionError> {
    let user = UserStore::get_user(user_id)
        .await?
        .ok_or(SessionError::NoSession)?;
    let links = AccountLinkStore::get_links_for_user(&user.id).await?;

    let ttl = *SESSION_TOKEN_TTL as i64;
    let now = Utc::now();
    let expires_at = now + Duration::seconds(ttl);

    let claims = SessionClaims {
        sub: user.id.clone(),
        iat: now.timestamp() as u64,
        exp: expires_at.timestamp() as u64,
        accounts: links.iter().map(LinkedAccount::from).collect(),
        steam_id: project_steam_id(&links),
    };

    let token = sign_claims(&claims)?;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.to_string(),
        token.clone(),
        expires_at,
        ttl,
    )
    .map_err(|e| SessionError::Cookie(e.to_string()))?;

    tracing::debug!(user_id = %user.id, "Minted session");

    Ok((headers, token))
}

/// Read a session token into a snapshot. Identity comes from the token;
/// the user row and linked accounts are reloaded so the snapshot reflects
/// links made or removed after the token was minted. A user deleted since
/// mint reads as anonymous.
pub async fn read_session(session_token: &str) -> Result<SessionSnapshot, SessionError> {
    let claims = verify_token(session_token)?;

    let Some(user) = UserStore::get_user(&claims.sub).await? else {
        return Ok(SessionSnapshot::anonymous());
    };

    let links = AccountLinkStore::get_links_for_user(&user.id).await?;

    let expires = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0);

    Ok(SessionSnapshot {
        user: Some(SessionUser {
            id: user.id,
            account: user.account,
            label: user.label,
            picture: user.picture,
            steam_id: project_steam_id(&links),
            accounts: links.iter().map(LinkedAccount::from).collect(),
        }),
        expires,
        authenticated: true,
    })
}

/// Extract the session token from the request's `Cookie` header
pub fn get_session_token_from_headers(headers: &HeaderMap) -> Result<Option<String>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        return Ok(None);
    };

    let cookies = cookie_header
        .to_str()
        .map_err(|e| SessionError::Cookie(e.to_string()))?;

    Ok(cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE_NAME.as_str()).then(|| value.to_string())
    }))
}

/// Headers that clear the session cookie in the browser
pub fn prepare_logout_response() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.to_string(),
        String::new(),
        Utc::now(),
        -86400,
    )
    .map_err(|e| SessionError::Cookie(e.to_string()))?;
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::HeaderValue;

    #[test]
    fn test_get_session_token_missing_header() {
        let headers = HeaderMap::new();
        let token =
            get_session_token_from_headers(&headers).expect("missing header should not error");
        assert!(token.is_none());
    }

    #[test]
    fn test_get_session_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!(
                "other=1; {}=the-token; another=2",
                SESSION_COOKIE_NAME.as_str()
            ))
            .expect("cookie header should build"),
        );

        let token =
            get_session_token_from_headers(&headers).expect("cookie parsing should not error");
        assert_eq!(token.as_deref(), Some("the-token"));
    }

    #[test]
    fn test_get_session_token_ignores_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("other=1; another=2"));

        let token =
            get_session_token_from_headers(&headers).expect("cookie parsing should not error");
        assert!(token.is_none());
    }

    #[test]
    fn test_logout_headers_clear_cookie() {
        let headers = prepare_logout_response().expect("logout headers should build");
        let cookie = headers
            .get(http::header::SET_COOKIE)
            .expect("Set-Cookie should be present")
            .to_str()
            .expect("Set-Cookie should be valid UTF-8");

        assert!(cookie.starts_with(&format!("{}=;", SESSION_COOKIE_NAME.as_str())));
        assert!(cookie.contains("Max-Age=-86400"));
    }
}
