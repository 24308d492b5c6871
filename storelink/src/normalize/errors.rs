use thiserror::Error;

/// Failure taxonomy for credential normalization. Adapter failures are
/// caught at this boundary and mapped to exactly one of these kinds.
#[derive(Debug, Error, Clone)]
pub enum NormalizeError {
    /// Malformed or missing input; no network call was made
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Network failure, timeout, or non-success status from the provider
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider responded but the payload could not be parsed into a
    /// normalized identity
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// The provider requires a second factor; the caller must re-prompt
    /// with a `code` field
    #[error("Second factor required")]
    TwoFactorRequired,
}
