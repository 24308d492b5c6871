use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};

use super::config::AUTH_SIGNING_SECRET;
use super::errors::SessionError;
use super::types::SessionClaims;

pub(super) fn sign_claims(claims: &SessionClaims) -> Result<String, SessionError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(AUTH_SIGNING_SECRET.as_bytes()),
    )
    .map_err(|e| SessionError::Token(e.to_string()))
}

pub(super) fn verify_token(token: &str) -> Result<SessionClaims, SessionError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(AUTH_SIGNING_SECRET.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::Token(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::LinkedAccount;
    use chrono::Utc;

    fn claims(exp_offset: i64) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: "u1".to_string(),
            iat: now as u64,
            exp: (now + exp_offset) as u64,
            accounts: vec![LinkedAccount {
                provider: "steam-credentials".to_string(),
                provider_account_id: "76561198000000000".to_string(),
            }],
            steam_id: Some("76561198000000000".to_string()),
        }
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let token = sign_claims(&claims(3600)).expect("signing should succeed");
        let verified = verify_token(&token).expect("verification should succeed");

        assert_eq!(verified.sub, "u1");
        assert_eq!(verified.steam_id.as_deref(), Some("76561198000000000"));
        assert_eq!(verified.accounts.len(), 1);
    }

    #[test]
    fn test_expired_token_maps_to_expired() {
        let token = sign_claims(&claims(-3600)).expect("signing should succeed");
        let result = verify_token(&token);
        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = sign_claims(&claims(3600)).expect("signing should succeed");
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        let result = verify_token(&tampered);
        assert!(matches!(result, Err(SessionError::Token(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = verify_token("not-a-jwt");
        assert!(matches!(result, Err(SessionError::Token(_))));
    }
}
