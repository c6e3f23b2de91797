//! OAuth2 identity provider - Google-style userinfo and token revocation.
//!
//! Interactive consent happens outside this process; the provider is handed
//! an access token obtained out of band and activates it on `sign_in`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OAuth2Config::from_auth_config(&app_config.auth)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let provider = OAuth2IdentityProvider::new(config)?;
//! ```

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

use crate::config::AuthConfig;
use crate::domain::auth::AuthError;
use crate::ports::{AccessToken, IdentityProvider, SignInSettings, UserInfo};

/// Configuration for the OAuth2 provider.
#[derive(Debug, Clone)]
pub struct OAuth2Config {
    pub userinfo_url: String,
    pub revoke_url: String,
    /// Token obtained out of band.
    access_token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl OAuth2Config {
    pub fn new(userinfo_url: impl Into<String>, revoke_url: impl Into<String>) -> Self {
        Self {
            userinfo_url: userinfo_url.into(),
            revoke_url: revoke_url.into(),
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            userinfo_url: config.userinfo_url.clone(),
            revoke_url: config.revoke_url.clone(),
            access_token: config.access_token.clone(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(Secret::new(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().is_empty())
    }
}

pub struct OAuth2IdentityProvider {
    config: OAuth2Config,
    client: Client,
    token: RwLock<Option<AccessToken>>,
}

impl OAuth2IdentityProvider {
    pub fn new(config: OAuth2Config) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AuthError::service_unavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            client,
            token: RwLock::new(None),
        })
    }

    fn read_token(&self) -> RwLockReadGuard<'_, Option<AccessToken>> {
        self.token.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_token(&self) -> RwLockWriteGuard<'_, Option<AccessToken>> {
        self.token.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn map_request_error(&self, e: reqwest::Error) -> AuthError {
        if e.is_timeout() {
            AuthError::service_unavailable(format!(
                "Identity provider timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else {
            AuthError::service_unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl IdentityProvider for OAuth2IdentityProvider {
    async fn sign_in(&self, settings: &SignInSettings) -> Result<(), AuthError> {
        let token = match &self.config.access_token {
            Some(token) if !token.expose_secret().is_empty() => {
                AccessToken::new(token.expose_secret().clone())
            }
            _ => {
                tracing::warn!(
                    client_id = %settings.client_id,
                    "No access token configured, interactive consent is not available"
                );
                return Err(AuthError::SignInCancelled);
            }
        };

        tracing::debug!(scope = %settings.scope, "Activating configured access token");
        *self.write_token() = Some(token);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(token) = self.read_token().clone() else {
            return Ok(());
        };

        let response = self
            .client
            .post(&self.config.revoke_url)
            .form(&[("token", token.secret())])
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Already expired or revoked.
            StatusCode::BAD_REQUEST => Ok(()),
            status => Err(AuthError::service_unavailable(format!(
                "Token revocation failed with status {}",
                status
            ))),
        }
    }

    fn token(&self) -> Option<AccessToken> {
        self.read_token().clone()
    }

    fn clear_token(&self) {
        *self.write_token() = None;
    }

    async fn user_info(&self) -> Result<UserInfo, AuthError> {
        let token = self.read_token().clone().ok_or(AuthError::NotSignedIn)?;

        let response = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        match response.status() {
            status if status.is_success() => response.json::<UserInfo>().await.map_err(|e| {
                AuthError::service_unavailable(format!("Invalid userinfo response: {}", e))
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidToken),
            status => Err(AuthError::service_unavailable(format!(
                "Userinfo request failed with status {}",
                status
            ))),
        }
    }
}
