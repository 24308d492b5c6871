use serde::{Deserialize, Serialize};

use crate::registry::STEAM_PROVIDER;

/// Normalized identity tuple produced by the credential normalizer.
/// The `provider_account_id` is always the provider-assigned stable id,
/// never a mutable display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedIdentity {
    pub provider: String,
    pub provider_account_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Provider profile as returned by each adapter, one variant per provider.
/// Downstream code pattern-matches instead of probing optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderProfile {
    Steam {
        steam_id: String,
        persona_name: String,
        avatar: Option<String>,
    },
    Epic {
        account_id: String,
        display_name: String,
    },
    Gog {
        user_id: String,
        username: String,
        avatar: Option<String>,
    },
    Itchio {
        user_id: String,
        username: String,
        cover_url: Option<String>,
    },
    Origin {
        pid: String,
        persona: String,
    },
    Rockstar {
        rockstar_id: String,
        nickname: String,
    },
    Ubisoft {
        profile_id: String,
        name_on_platform: String,
    },
    Battlenet {
        sub: String,
        battletag: String,
    },
    Discord {
        id: String,
        username: String,
        avatar: Option<String>,
    },
    Google {
        sub: String,
        name: String,
        picture: Option<String>,
    },
}

impl ProviderProfile {
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Steam { .. } => STEAM_PROVIDER,
            Self::Epic { .. } => "epic",
            Self::Gog { .. } => "gog",
            Self::Itchio { .. } => "itchio",
            Self::Origin { .. } => "origin",
            Self::Rockstar { .. } => "rockstar",
            Self::Ubisoft { .. } => "ubisoft",
            Self::Discord { .. } => "discord",
            Self::Google { .. } => "google",
            Self::Battlenet { .. } => "battlenet",
        }
    }

    pub fn into_identity(self) -> NormalizedIdentity {
        let provider = self.provider().to_string();
        match self {
            Self::Steam {
                steam_id,
                persona_name,
                avatar,
            } => NormalizedIdentity {
                provider,
                provider_account_id: steam_id,
                display_name: persona_name,
                avatar_url: avatar,
            },
            Self::Epic {
                account_id,
                display_name,
            } => NormalizedIdentity {
                provider,
                provider_account_id: account_id,
                display_name,
                avatar_url: None,
            },
            Self::Gog {
                user_id,
                username,
                avatar,
            } => NormalizedIdentity {
                provider,
                provider_account_id: user_id,
                display_name: username,
                avatar_url: avatar,
            },
            Self::Itchio {
                user_id,
                username,
                cover_url,
            } => NormalizedIdentity {
                provider,
                provider_account_id: user_id,
                display_name: username,
                avatar_url: cover_url,
            },
            Self::Origin { pid, persona } => NormalizedIdentity {
                provider,
                provider_account_id: pid,
                display_name: persona,
                avatar_url: None,
            },
            Self::Rockstar {
                rockstar_id,
                nickname,
            } => NormalizedIdentity {
                provider,
                provider_account_id: rockstar_id,
                display_name: nickname,
                avatar_url: None,
            },
            Self::Ubisoft {
                profile_id,
                name_on_platform,
            } => NormalizedIdentity {
                provider,
                provider_account_id: profile_id,
                display_name: name_on_platform,
                avatar_url: None,
            },
            Self::Battlenet { sub, battletag } => NormalizedIdentity {
                provider,
                provider_account_id: sub,
                display_name: battletag,
                avatar_url: None,
            },
            Self::Discord {
                id,
                username,
                avatar,
            } => NormalizedIdentity {
                provider,
                provider_account_id: id,
                display_name: username,
                avatar_url: avatar,
            },
            Self::Google { sub, name, picture } => NormalizedIdentity {
                provider,
                provider_account_id: sub,
                display_name: name,
                avatar_url: picture,
            },
        }
    }
}
