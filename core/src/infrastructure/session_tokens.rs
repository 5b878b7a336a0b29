// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::auth::{AuthError, SessionClaims, TokenAuthority, SESSION_TTL_HOURS};

/// HS256 session-token authority keyed by the persisted process secret.
pub struct JwtTokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenAuthority {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenAuthority for JwtTokenAuthority {
    fn issue(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<String, AuthError> {
        // Validation::default() is HS256 with expiry checking.
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";

    #[test]
    fn test_issued_token_verifies_and_preserves_subject() {
        let authority = JwtTokenAuthority::new(TEST_SECRET);
        let token = authority.issue("admin").unwrap();
        assert_eq!(authority.verify(&token).unwrap(), "admin");
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let authority = JwtTokenAuthority::new(TEST_SECRET);
        assert_eq!(
            authority.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_verify_rejects_token_signed_with_other_secret() {
        let token = JwtTokenAuthority::new("other-secret").issue("admin").unwrap();
        let authority = JwtTokenAuthority::new(TEST_SECRET);
        assert_eq!(authority.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let authority = JwtTokenAuthority::new(TEST_SECRET);
        let now = Utc::now();
        let claims = SessionClaims {
            sub: "admin".to_string(),
            iat: (now - chrono::Duration::hours(25)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(authority.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expiry_is_twenty_four_hours_out() {
        let authority = JwtTokenAuthority::new(TEST_SECRET);
        let token = authority.issue("admin").unwrap();

        let mut validation = Validation::default();
        validation.validate_exp = false;
        let data = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, SESSION_TTL_HOURS * 3600);
    }
}
