use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use storelink::{
    AccountLink, SessionSnapshot, build_authorize_url, callback_redirect_core, disconnect_core,
    list_links_core, prepare_logout_response, session_read_core, signin_core,
};

use super::error::IntoResponseError;
use super::session::AuthUser;

/// All federation routes, meant to be nested under
/// [`SL_ROUTE_PREFIX`](storelink::SL_ROUTE_PREFIX)
pub fn federation_router() -> Router {
    Router::new()
        .route("/signin", post(signin))
        .route("/session", get(session_read))
        .route("/logout", get(logout))
        .route("/steam", get(steam_redirect))
        .route("/steam/authorized", get(steam_authorized))
        .route("/accounts", get(list_accounts))
        .route("/accounts/{provider}", delete(disconnect_account))
}

#[derive(Debug, Deserialize)]
struct SigninRequest {
    provider: String,
    /// Provider-specific credential fields, e.g. `steamid` or `access_token`
    #[serde(flatten)]
    fields: HashMap<String, String>,
}

/// An account link as exposed over the API. The stored payload (bearer
/// tokens) never leaves the server.
#[derive(Debug, Serialize)]
struct LinkSummary {
    provider: String,
    provider_account_id: String,
    link_type: String,
    display_name: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AccountLink> for LinkSummary {
    fn from(link: AccountLink) -> Self {
        Self {
            provider: link.provider,
            provider_account_id: link.provider_account_id,
            link_type: link.link_type,
            display_name: link.display_name,
            avatar_url: link.avatar_url,
            created_at: link.created_at,
        }
    }
}

/// Sign in with provider credentials. An authenticated caller links the
/// new external account to their existing user.
async fn signin(
    user: Option<AuthUser>,
    Json(request): Json<SigninRequest>,
) -> Result<(HeaderMap, Json<SessionSnapshot>), (StatusCode, String)> {
    let caller_user_id = user.map(|u| u.id);
    let (headers, snapshot) = signin_core(&request.provider, &request.fields, caller_user_id)
        .await
        .into_response_error()?;

    Ok((headers, Json(snapshot)))
}

/// Current session as a snapshot that is always well-formed JSON, even
/// when anonymous or when the read fails server-side
async fn session_read(headers: HeaderMap) -> impl IntoResponse {
    match session_read_core(&headers).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)),
        Err(e) => {
            tracing::error!("Session read failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SessionSnapshot::anonymous()),
            )
        }
    }
}

async fn logout() -> Result<(HeaderMap, Json<SessionSnapshot>), (StatusCode, String)> {
    let headers = prepare_logout_response()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok((headers, Json(SessionSnapshot::anonymous())))
}

/// Kick off the delegated Steam sign-in by redirecting to the provider
async fn steam_redirect() -> Result<Redirect, (StatusCode, String)> {
    let url = build_authorize_url()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Redirect::temporary(&url))
}

/// Provider callback. Always redirects: to the completion route with the
/// verified SteamID64, or to the error route with a stable error code.
async fn steam_authorized(Query(params): Query<HashMap<String, String>>) -> Redirect {
    let target = callback_redirect_core(&params).await;
    Redirect::temporary(&target)
}

async fn list_accounts(
    user: AuthUser,
) -> Result<Json<Vec<LinkSummary>>, (StatusCode, String)> {
    let links = list_links_core(Some(&(&user).into()))
        .await
        .into_response_error()?;

    Ok(Json(links.into_iter().map(LinkSummary::from).collect()))
}

async fn disconnect_account(
    user: AuthUser,
    Path(provider): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    disconnect_core(Some(&(&user).into()), &provider)
        .await
        .into_response_error()?;

    Ok(StatusCode::NO_CONTENT)
}
