// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Session Service
//!
//! The single authentication choke-point: every login and every bearer-token
//! check passes through here. Rate limiting runs **before** credential
//! checks, so a flooded source learns nothing about credential validity.

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::auth::{AuthConfig, AuthError, TokenAuthority};

/// Login attempts allowed in a burst per source IP.
const LOGIN_BURST: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Replenishment rate: 20/hour = one permit every 3 minutes, i.e. 5 attempts
/// per 15-minute window once the burst is spent.
const LOGIN_REPLENISH_PER_HOUR: NonZeroU32 = NonZeroU32::new(20).unwrap();

pub struct SessionService {
    users: AuthConfig,
    tokens: Arc<dyn TokenAuthority>,
    login_limiter: DefaultKeyedRateLimiter<IpAddr>,
}

impl SessionService {
    pub fn new(users: AuthConfig, tokens: Arc<dyn TokenAuthority>) -> Self {
        let quota = Quota::per_hour(LOGIN_REPLENISH_PER_HOUR).allow_burst(LOGIN_BURST);
        Self {
            users,
            tokens,
            login_limiter: RateLimiter::keyed(quota),
        }
    }

    /// Authenticate a credential pair and issue a session token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TooManyRequests`] — the source IP exhausted its login
    ///   quota; credentials were not examined.
    /// - [`AuthError::InvalidCredentials`] — unknown user or wrong password.
    pub fn login(&self, source: IpAddr, username: &str, password: &str) -> Result<String, AuthError> {
        if self.login_limiter.check_key(&source).is_err() {
            warn!("Login rate limit exceeded for {}", source);
            return Err(AuthError::TooManyRequests);
        }

        self.users.check(username, password)?;
        let token = self.tokens.issue(username)?;
        info!("Issued session token for {}", username);
        Ok(token)
    }

    /// Verify the `Authorization` header of a protected request and return
    /// the session's username.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingToken`] — header absent or not a bearer scheme.
    /// - [`AuthError::InvalidToken`] — signature invalid or token expired.
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<String, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        let token = header.strip_prefix("Bearer ").ok_or(AuthError::MissingToken)?;
        self.tokens.verify(token.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    /// Token port stub that round-trips the username in cleartext.
    struct EchoTokens;

    impl TokenAuthority for EchoTokens {
        fn issue(&self, username: &str) -> Result<String, AuthError> {
            Ok(format!("tok:{username}"))
        }

        fn verify(&self, token: &str) -> Result<String, AuthError> {
            token
                .strip_prefix("tok:")
                .map(str::to_string)
                .ok_or(AuthError::InvalidToken)
        }
    }

    fn service() -> SessionService {
        SessionService::new(AuthConfig::default(), Arc::new(EchoTokens))
    }

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_login_with_valid_credentials_issues_token() {
        let token = service().login(ip(1), "admin", "navpanel123").unwrap();
        assert_eq!(token, "tok:admin");
    }

    #[test]
    fn test_login_with_bad_credentials_is_rejected() {
        assert_eq!(
            service().login(ip(1), "admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_sixth_attempt_from_same_ip_is_rate_limited() {
        let service = service();
        for _ in 0..5 {
            assert_eq!(
                service.login(ip(1), "admin", "wrong"),
                Err(AuthError::InvalidCredentials)
            );
        }
        // Rejected before credentials are examined, even if they are correct.
        assert_eq!(
            service.login(ip(1), "admin", "navpanel123"),
            Err(AuthError::TooManyRequests)
        );
    }

    #[test]
    fn test_rate_limit_is_keyed_by_source_ip() {
        let service = service();
        for _ in 0..5 {
            let _ = service.login(ip(1), "admin", "wrong");
        }
        assert_eq!(
            service.login(ip(2), "admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_verify_bearer_accepts_issued_token() {
        let service = service();
        let token = service.login(ip(3), "admin", "navpanel123").unwrap();
        let username = service.verify_bearer(Some(&format!("Bearer {token}"))).unwrap();
        assert_eq!(username, "admin");
    }

    #[test]
    fn test_verify_bearer_missing_header() {
        assert_eq!(service().verify_bearer(None), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_verify_bearer_rejects_non_bearer_scheme() {
        assert_eq!(
            service().verify_bearer(Some("Basic YWRtaW46eA==")),
            Err(AuthError::MissingToken)
        );
    }
}
