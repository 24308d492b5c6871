use std::env;
use std::sync::LazyLock;

/// Prefix under which all federation routes are mounted
pub static SL_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("SL_ROUTE_PREFIX").unwrap_or_else(|_| "/auth".to_string()));

/// Public origin of this service, used to build absolute return URLs
/// for the delegated-auth flow and authorization-code redirects
pub(crate) static SL_PUBLIC_ORIGIN: LazyLock<String> = LazyLock::new(|| {
    env::var("SL_PUBLIC_ORIGIN").unwrap_or_else(|_| "http://localhost:3001".to_string())
});

#[cfg(test)]
mod tests {
    use std::env;

    #[test]
    fn test_route_prefix_default() {
        // The statics are process-global, so only exercise the parsing logic here
        let prefix = env::var("SL_ROUTE_PREFIX_MISSING").unwrap_or_else(|_| "/auth".to_string());
        assert_eq!(prefix, "/auth");
    }
}
