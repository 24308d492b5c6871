//! Static provider registry.
//!
//! The set of supported providers and their required credential fields is
//! global configuration built once at process start. Adding a provider
//! means adding one entry here and one adapter in `normalize::adapters`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Provider id of the delegated-auth completion provider; its link carries
/// the SteamID64 projected into the session as a convenience field.
pub const STEAM_PROVIDER: &str = "steam-credentials";

/// How a provider authenticates users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Two-phase redirect/verify protocol; credentials leg carries the
    /// already-verified provider account id
    DelegatedAuth,
    /// Profile lookup with a client-supplied bearer token
    BearerToken,
    /// Ticket login with email and password, second-factor aware
    Ticket,
    /// Standard authorization-code flow
    AuthorizationCode,
}

/// Kind of link record produced by a successful sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Credentials,
    AuthorizationCode,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::AuthorizationCode => "authorization-code",
        }
    }
}

/// Adapter descriptor for one external provider
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub kind: ProviderKind,
    /// Credential fields that must be present and non-empty before any
    /// network call is made
    pub required_fields: &'static [&'static str],
    pub link_type: LinkType,
}

pub static PROVIDER_REGISTRY: LazyLock<HashMap<&'static str, ProviderDescriptor>> =
    LazyLock::new(|| {
        let providers = [
            ProviderDescriptor {
                id: STEAM_PROVIDER,
                kind: ProviderKind::DelegatedAuth,
                required_fields: &["steamid"],
                link_type: LinkType::Credentials,
            },
            ProviderDescriptor {
                id: "epic",
                kind: ProviderKind::BearerToken,
                required_fields: &["access_token"],
                link_type: LinkType::Credentials,
            },
            ProviderDescriptor {
                id: "gog",
                kind: ProviderKind::BearerToken,
                required_fields: &["access_token"],
                link_type: LinkType::Credentials,
            },
            ProviderDescriptor {
                id: "itchio",
                kind: ProviderKind::BearerToken,
                required_fields: &["access_token"],
                link_type: LinkType::Credentials,
            },
            ProviderDescriptor {
                id: "origin",
                kind: ProviderKind::BearerToken,
                required_fields: &["access_token"],
                link_type: LinkType::Credentials,
            },
            ProviderDescriptor {
                id: "rockstar",
                kind: ProviderKind::Ticket,
                required_fields: &["email", "password"],
                link_type: LinkType::Credentials,
            },
            ProviderDescriptor {
                id: "ubisoft",
                kind: ProviderKind::Ticket,
                required_fields: &["email", "password"],
                link_type: LinkType::Credentials,
            },
            ProviderDescriptor {
                id: "discord",
                kind: ProviderKind::AuthorizationCode,
                required_fields: &["code"],
                link_type: LinkType::AuthorizationCode,
            },
            ProviderDescriptor {
                id: "google",
                kind: ProviderKind::AuthorizationCode,
                required_fields: &["code"],
                link_type: LinkType::AuthorizationCode,
            },
            ProviderDescriptor {
                id: "battlenet",
                kind: ProviderKind::AuthorizationCode,
                required_fields: &["code"],
                link_type: LinkType::AuthorizationCode,
            },
        ];

        providers.into_iter().map(|p| (p.id, p)).collect()
    });

/// Look up the descriptor for a provider id
pub fn descriptor(provider: &str) -> Option<&'static ProviderDescriptor> {
    PROVIDER_REGISTRY.get(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_all_providers() {
        for id in [
            STEAM_PROVIDER,
            "epic",
            "gog",
            "itchio",
            "origin",
            "rockstar",
            "ubisoft",
            "discord",
            "google",
            "battlenet",
        ] {
            assert!(descriptor(id).is_some(), "missing provider {id}");
        }
        assert_eq!(PROVIDER_REGISTRY.len(), 10);
    }

    #[test]
    fn test_unknown_provider_is_absent() {
        assert!(descriptor("itch").is_none());
        assert!(descriptor("").is_none());
    }

    #[test]
    fn test_provider_kinds() {
        assert_eq!(
            descriptor(STEAM_PROVIDER).unwrap().kind,
            ProviderKind::DelegatedAuth
        );
        assert_eq!(descriptor("epic").unwrap().kind, ProviderKind::BearerToken);
        assert_eq!(descriptor("gog").unwrap().kind, ProviderKind::BearerToken);
        assert_eq!(descriptor("itchio").unwrap().kind, ProviderKind::BearerToken);
        assert_eq!(descriptor("origin").unwrap().kind, ProviderKind::BearerToken);
        assert_eq!(descriptor("rockstar").unwrap().kind, ProviderKind::Ticket);
        assert_eq!(descriptor("ubisoft").unwrap().kind, ProviderKind::Ticket);
        assert_eq!(
            descriptor("discord").unwrap().kind,
            ProviderKind::AuthorizationCode
        );
        assert_eq!(
            descriptor("battlenet").unwrap().kind,
            ProviderKind::AuthorizationCode
        );
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            descriptor(STEAM_PROVIDER).unwrap().required_fields,
            &["steamid"]
        );
        assert_eq!(
            descriptor("rockstar").unwrap().required_fields,
            &["email", "password"]
        );
    }

    #[test]
    fn test_link_type_as_str() {
        assert_eq!(LinkType::Credentials.as_str(), "credentials");
        assert_eq!(LinkType::AuthorizationCode.as_str(), "authorization-code");
    }
}
