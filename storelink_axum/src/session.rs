use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use axum_extra::{TypedHeader, headers};
use http::{StatusCode, request::Parts};

use storelink::{LinkedAccount, SESSION_COOKIE_NAME, SessionUser, read_session};

/// Rejection for handlers requiring an authenticated caller
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

/// Authenticated user information, available as an Axum extractor
///
/// When used as an extractor it reads the session cookie and resolves it
/// to a fresh snapshot; an `Option<AuthUser>` parameter makes the handler
/// available to anonymous callers too.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use storelink_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.label)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Unique user identifier
    pub id: String,
    /// User's stable account key
    pub account: String,
    /// User's display name
    pub label: String,
    /// Avatar URL, when one is known
    pub picture: Option<String>,
    /// Linked external accounts at the time of the read
    pub accounts: Vec<LinkedAccount>,
    /// SteamID64 of the delegated-auth link, if any
    pub steam_id: Option<String>,
}

impl From<SessionUser> for AuthUser {
    fn from(session_user: SessionUser) -> Self {
        AuthUser {
            id: session_user.id,
            account: session_user.account,
            label: session_user.label,
            picture: session_user.picture,
            accounts: session_user.accounts,
            steam_id: session_user.steam_id,
        }
    }
}

impl From<&AuthUser> for SessionUser {
    fn from(auth_user: &AuthUser) -> Self {
        SessionUser {
            id: auth_user.id.clone(),
            account: auth_user.account.clone(),
            label: auth_user.label.clone(),
            picture: auth_user.picture.clone(),
            accounts: auth_user.accounts.clone(),
            steam_id: auth_user.steam_id.clone(),
        }
    }
}

async fn auth_user_from_parts(parts: &mut Parts) -> Option<AuthUser> {
    let cookies: TypedHeader<headers::Cookie> = parts.extract().await.ok()?;

    let session_cookie = cookies.get(SESSION_COOKIE_NAME.as_str())?;

    let snapshot = read_session(session_cookie)
        .await
        .map_err(|e| {
            tracing::debug!("Session read failed: {}", e);
        })
        .ok()?;

    snapshot.user.map(AuthUser::from)
}

impl<B> FromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _: &B) -> Result<Self, Self::Rejection> {
        auth_user_from_parts(parts).await.ok_or(AuthRejection)
    }
}

impl<B> OptionalFromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &B,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(auth_user_from_parts(parts).await)
    }
}
