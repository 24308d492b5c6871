use thiserror::Error;

/// Failures of the delegated-auth callback. Every variant ends in a
/// redirect to the error route; `error_code` is the query-string value
/// the frontend switches on.
#[derive(Debug, Error, Clone)]
pub enum DelegatedError {
    #[error("Missing callback parameter: {0}")]
    MissingParameter(String),

    /// The provider did not confirm the assertion signature
    #[error("Assertion verification failed")]
    VerificationFailed,

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// claimed_id did not match the expected identity URL shape
    #[error("Invalid claimed id: {0}")]
    InvalidClaimedId(String),
}

impl DelegatedError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "missing_parameter",
            Self::VerificationFailed => "verification_failed",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::InvalidClaimedId(_) => "invalid_claimed_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            DelegatedError::MissingParameter("openid.sig".into()).error_code(),
            "missing_parameter"
        );
        assert_eq!(
            DelegatedError::VerificationFailed.error_code(),
            "verification_failed"
        );
        assert_eq!(
            DelegatedError::ProviderUnavailable("timeout".into()).error_code(),
            "provider_unavailable"
        );
        assert_eq!(
            DelegatedError::InvalidClaimedId("bad".into()).error_code(),
            "invalid_claimed_id"
        );
    }
}
