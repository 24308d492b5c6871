use std::env;
use std::sync::LazyLock;

/// Session cookie name. The `__Host-` prefix binds the cookie to the
/// exact host over HTTPS with `Path=/`.
pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "__Host-AuthToken".to_string())
});

/// Session token lifetime in seconds
pub(crate) static SESSION_TOKEN_TTL: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_TOKEN_TTL")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600)
});

/// HMAC secret for session token signatures. Every instance that should
/// accept each other's tokens must share this value.
pub(crate) static AUTH_SIGNING_SECRET: LazyLock<String> = LazyLock::new(|| {
    env::var("AUTH_SIGNING_SECRET").unwrap_or_else(|_| {
        tracing::warn!("AUTH_SIGNING_SECRET not set, using an insecure development secret");
        "insecure-development-signing-secret".to_string()
    })
});

#[cfg(test)]
mod tests {
    use std::env;

    #[test]
    fn test_session_ttl_default_parsing() {
        let ttl: u64 = env::var("SESSION_TOKEN_TTL_MISSING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);
        assert_eq!(ttl, 3600);
    }
}
