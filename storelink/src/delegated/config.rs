use std::env;
use std::sync::LazyLock;

use crate::config::{SL_PUBLIC_ORIGIN, SL_ROUTE_PREFIX};

pub(super) static STEAM_OPENID_ENDPOINT: LazyLock<String> = LazyLock::new(|| {
    env::var("STEAM_OPENID_ENDPOINT")
        .unwrap_or_else(|_| "https://steamcommunity.com/openid/login".to_string())
});

/// Absolute URL Steam redirects back to after the user signs in
pub(super) static DELEGATED_RETURN_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("DELEGATED_RETURN_URL").unwrap_or_else(|_| {
        format!(
            "{}{}/steam/authorized",
            SL_PUBLIC_ORIGIN.as_str(),
            SL_ROUTE_PREFIX.as_str()
        )
    })
});

/// Frontend route a verified callback redirects to, carrying `steamId`
pub static DELEGATED_COMPLETE_ROUTE: LazyLock<String> = LazyLock::new(|| {
    env::var("DELEGATED_COMPLETE_ROUTE").unwrap_or_else(|_| "/login/steam".to_string())
});

/// Frontend route a failed callback redirects to, carrying `error`
pub static DELEGATED_ERROR_ROUTE: LazyLock<String> = LazyLock::new(|| {
    env::var("DELEGATED_ERROR_ROUTE").unwrap_or_else(|_| "/login/error".to_string())
});
