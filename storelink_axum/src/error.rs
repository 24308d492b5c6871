use http::StatusCode;
use storelink::{FederationError, LinkError, NormalizeError};

/// Helper trait for converting errors to a standard response error format
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Implementation for FederationError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, FederationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                FederationError::Unauthorized => StatusCode::UNAUTHORIZED,
                FederationError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                FederationError::Normalize(err) => match err {
                    NormalizeError::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
                    NormalizeError::InvalidProfile(_) => StatusCode::BAD_REQUEST,
                    NormalizeError::TwoFactorRequired => StatusCode::UNAUTHORIZED,
                    NormalizeError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
                },
                FederationError::Link(LinkError::LinkTargetNotFound(_)) => StatusCode::NOT_FOUND,
                FederationError::Delegated(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let result: Result<(), FederationError> = Err(FederationError::Unauthorized);
        let response_error = result.into_response_error();

        assert!(response_error.is_err());
        if let Err((status, _)) = response_error {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_invalid_credentials_maps_to_400() {
        let result: Result<(), FederationError> = Err(FederationError::Normalize(
            NormalizeError::InvalidCredentials("missing steamid".to_string()),
        ));
        let response_error = result.into_response_error();

        assert!(matches!(
            response_error,
            Err((StatusCode::BAD_REQUEST, _))
        ));
    }

    #[test]
    fn test_two_factor_required_maps_to_401() {
        let result: Result<(), FederationError> =
            Err(FederationError::Normalize(NormalizeError::TwoFactorRequired));
        let response_error = result.into_response_error();

        assert!(matches!(
            response_error,
            Err((StatusCode::UNAUTHORIZED, _))
        ));
    }

    #[test]
    fn test_provider_unavailable_maps_to_502() {
        let result: Result<(), FederationError> = Err(FederationError::Normalize(
            NormalizeError::ProviderUnavailable("timeout".to_string()),
        ));
        let response_error = result.into_response_error();

        assert!(matches!(
            response_error,
            Err((StatusCode::BAD_GATEWAY, _))
        ));
    }

    #[test]
    fn test_link_target_not_found_maps_to_404() {
        let result: Result<(), FederationError> = Err(FederationError::Link(
            LinkError::LinkTargetNotFound("u1".to_string()),
        ));
        let response_error = result.into_response_error();

        assert!(matches!(response_error, Err((StatusCode::NOT_FOUND, _))));
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let result: Result<(), FederationError> =
            Err(FederationError::Link(LinkError::Storage("db".to_string())));
        let response_error = result.into_response_error();

        assert!(matches!(
            response_error,
            Err((StatusCode::INTERNAL_SERVER_ERROR, _))
        ));
    }
}
