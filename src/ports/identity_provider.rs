//! Identity provider port.
//!
//! Abstracts the third-party OAuth2 service that performs interactive
//! sign-in and owns the access token.
//!
//! # Contract
//!
//! Implementations must:
//! - Hold the access token obtained by `sign_in` until `clear_token`
//! - Return `AuthError::NotSignedIn` from `user_info` when no token is held
//! - Return `AuthError::InvalidToken` when the provider rejects the token
//! - Return `AuthError::ServiceUnavailable` for transient errors

use std::fmt;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::auth::AuthError;

/// Settings handed to the provider's interactive sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInSettings {
    pub client_id: String,
    /// Space separated OAuth2 scopes.
    pub scope: String,
}

impl Default for SignInSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            scope: "email profile".to_string(),
        }
    }
}

/// Bearer access token. Never printed.
pub struct AccessToken(Secret<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }

    /// Exposes the token for building an `Authorization` header.
    pub fn secret(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl Clone for AccessToken {
    fn clone(&self) -> Self {
        Self::new(self.0.expose_secret().clone())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// What the provider's user-info endpoint reported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub verified_email: Option<bool>,
}

/// Third-party OAuth2 identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Runs the provider's sign-in and stores the resulting token.
    async fn sign_in(&self, settings: &SignInSettings) -> Result<(), AuthError>;

    /// Signs out at the provider.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The current access token, if any.
    fn token(&self) -> Option<AccessToken>;

    /// Forgets the local access token so further API calls fail as unauthorized.
    fn clear_token(&self);

    /// Fetches the signed-in user's profile information.
    async fn user_info(&self) -> Result<UserInfo, AuthError>;
}
