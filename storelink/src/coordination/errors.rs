//! Error types for the coordination layer

use thiserror::Error;

use crate::delegated::DelegatedError;
use crate::linking::LinkError;
use crate::normalize::NormalizeError;
use crate::session::SessionError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur while coordinating a federation flow
#[derive(Error, Debug)]
pub enum FederationError {
    /// Unauthorized access error
    #[error("Unauthorized access")]
    Unauthorized,

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Error from credential normalization
    #[error("Normalize error: {0}")]
    Normalize(NormalizeError),

    /// Error from the delegated-auth verifier
    #[error("Delegated auth error: {0}")]
    Delegated(DelegatedError),

    /// Error from the account linker
    #[error("Link error: {0}")]
    Link(LinkError),

    /// Error from session operations
    #[error("Session error: {0}")]
    Session(SessionError),

    /// Error from the user database
    #[error("User error: {0}")]
    User(UserError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(UtilError),
}

impl FederationError {
    /// Log the error and return self
    ///
    /// This method logs the error with appropriate context and returns self,
    /// allowing for method chaining and explicit logging when needed.
    ///
    pub fn log(self) -> Self {
        match &self {
            Self::Unauthorized => tracing::error!("Unauthorized access"),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::error!("Resource not found: {} {}", resource_type, resource_id),
            Self::Normalize(err) => tracing::error!("Normalize error: {}", err),
            Self::Delegated(err) => tracing::error!("Delegated auth error: {}", err),
            Self::Link(err) => tracing::error!("Link error: {}", err),
            Self::Session(err) => tracing::error!("Session error: {}", err),
            Self::User(err) => tracing::error!("User error: {}", err),
            Self::Utils(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<NormalizeError> for FederationError {
    fn from(err: NormalizeError) -> Self {
        let error = Self::Normalize(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<DelegatedError> for FederationError {
    fn from(err: DelegatedError) -> Self {
        let error = Self::Delegated(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<LinkError> for FederationError {
    fn from(err: LinkError) -> Self {
        let error = Self::Link(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for FederationError {
    fn from(err: SessionError) -> Self {
        let error = Self::Session(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for FederationError {
    fn from(err: UserError) -> Self {
        let error = Self::User(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for FederationError {
    fn from(err: UtilError) -> Self {
        let error = Self::Utils(err);
        tracing::error!("{}", error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<FederationError>();
    }

    #[test]
    fn test_error_display() {
        let err = FederationError::Unauthorized;
        assert_eq!(err.to_string(), "Unauthorized access");

        let err = FederationError::ResourceNotFound {
            resource_type: "AccountLink".to_string(),
            resource_id: "gog".to_string(),
        };
        assert_eq!(err.to_string(), "Resource not found: AccountLink gog");

        let err = FederationError::Normalize(NormalizeError::TwoFactorRequired);
        assert_eq!(err.to_string(), "Normalize error: Second factor required");
    }

    #[test]
    fn test_from_conversions_preserve_kind() {
        let err: FederationError = NormalizeError::TwoFactorRequired.into();
        assert!(matches!(
            err,
            FederationError::Normalize(NormalizeError::TwoFactorRequired)
        ));

        let err: FederationError = LinkError::LinkTargetNotFound("u1".to_string()).into();
        assert!(matches!(err, FederationError::Link(_)));

        let err: FederationError = SessionError::Expired.into();
        assert!(matches!(
            err,
            FederationError::Session(SessionError::Expired)
        ));
    }
}
