//! Shared outbound HTTP client for provider calls.
//!
//! Every provider round-trip goes through this client so that a provider
//! which stops responding fails the request within the configured timeout
//! instead of hanging it.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

/// Per-request timeout for provider calls, in seconds
static PROVIDER_HTTP_TIMEOUT: LazyLock<u64> = LazyLock::new(|| {
    env::var("PROVIDER_HTTP_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10)
});

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(*PROVIDER_HTTP_TIMEOUT))
        .build()
        .expect("Failed to build HTTP client")
});

pub(crate) fn get_client() -> &'static reqwest::Client {
    &HTTP_CLIENT
}
