// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Session Authority Domain Model
//!
//! Credentials, session claims, and the token port for the dashboard's
//! authentication layer.
//!
//! ## Session Lifecycle
//!
//! ```text
//! POST /login (username, password)
//!   └─ AuthConfig::check(username, password)     ← exact-match credential check
//!   └─ TokenAuthority::issue(username)           ← signed claims, 24h expiry
//!         └─ TokenAuthority::verify(token)       ← on every protected request
//! ```
//!
//! ## Invariants
//!
//! - The user table is loaded once at process start and is read-only
//!   thereafter; there is no user-management API.
//! - A token is valid iff its signature verifies against the process secret
//!   and its expiry has not passed. Nothing is stored server-side.
//! - Unknown username and wrong password produce the same
//!   [`AuthError::InvalidCredentials`], so callers cannot enumerate users.
//!
//! The signature scheme itself is abstracted behind [`TokenAuthority`]; the
//! JWT implementation lives in [`crate::infrastructure::session_tokens`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Session lifetime, measured from issuance.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Username seeded into a fresh user table.
pub const DEFAULT_ADMIN_USER: &str = "admin";

/// Password seeded for [`DEFAULT_ADMIN_USER`] on first boot. Operators are
/// expected to edit `auth.yaml` before exposing the dashboard.
pub const DEFAULT_ADMIN_PASSWORD: &str = "navpanel123";

/// One entry in the user table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub password: String,
}

/// The on-disk user table (`auth.yaml`), keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub users: BTreeMap<String, UserEntry>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let mut users = BTreeMap::new();
        users.insert(
            DEFAULT_ADMIN_USER.to_string(),
            UserEntry {
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
            },
        );
        Self { users }
    }
}

impl AuthConfig {
    /// Check a credential pair against the table.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown username or a
    /// password mismatch; the two cases are indistinguishable to the caller.
    pub fn check(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.users.get(username) {
            Some(entry) if entry.password == password => Ok(()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// Claims carried inside a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username the session was issued to.
    pub sub: String,
    /// Issuance time (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds): `iat` + [`SESSION_TTL_HOURS`].
    pub exp: i64,
}

/// Errors produced by the session authority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid or expired session token")]
    InvalidToken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Too many login attempts, try again later")]
    TooManyRequests,
    #[error("Failed to sign session token: {0}")]
    Signing(String),
}

/// Signature scheme port for session tokens.
///
/// Keeps the domain layer free of JWT dependencies; the concrete HS256
/// implementation is [`crate::infrastructure::session_tokens::JwtTokenAuthority`].
pub trait TokenAuthority: Send + Sync {
    /// Sign `{sub, iat, exp = iat + 24h}` into an opaque token string.
    fn issue(&self, username: &str) -> Result<String, AuthError>;

    /// Verify a token and return the username it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the signature does not verify
    /// or the token has expired.
    fn verify(&self, token: &str) -> Result<String, AuthError>;
}
