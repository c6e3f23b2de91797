//! Authentication configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::client::Environment;
use super::error::ValidationError;
use crate::ports::SignInSettings;

/// Authentication configuration (OAuth2 identity provider)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OAuth2 client ID
    #[serde(default)]
    pub client_id: String,

    /// Space separated OAuth2 scopes
    #[serde(default = "default_scope")]
    pub scope: String,

    /// User-info endpoint
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,

    /// Token revocation endpoint
    #[serde(default = "default_revoke_url")]
    pub revoke_url: String,

    /// Access token obtained out of band, used for non-interactive sign-in
    #[serde(default)]
    pub access_token: Option<Secret<String>>,

    /// Seconds after which an unanswered login prompt counts as dismissed.
    /// Unset means the prompt waits indefinitely.
    #[serde(default)]
    pub login_timeout_secs: Option<u64>,
}

impl AuthConfig {
    /// Get login prompt timeout as Duration
    pub fn login_timeout(&self) -> Option<Duration> {
        self.login_timeout_secs.map(Duration::from_secs)
    }

    /// Settings passed to the identity provider's sign-in
    pub fn sign_in_settings(&self) -> SignInSettings {
        SignInSettings {
            client_id: self.client_id.clone(),
            scope: self.scope.clone(),
        }
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the provider endpoints.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__CLIENT_ID"));
        }
        if self.scope.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SCOPE"));
        }
        for (name, url) in [
            ("AUTH__USERINFO_URL", &self.userinfo_url),
            ("AUTH__REVOKE_URL", &self.revoke_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl(name));
            }
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::HttpsRequired(name));
            }
        }
        if self.login_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            scope: default_scope(),
            userinfo_url: default_userinfo_url(),
            revoke_url: default_revoke_url(),
            access_token: None,
            login_timeout_secs: None,
        }
    }
}

fn default_scope() -> String {
    "email profile".to_string()
}

fn default_userinfo_url() -> String {
    "https://www.googleapis.com/oauth2/v2/userinfo".to_string()
}

fn default_revoke_url() -> String {
    "https://oauth2.googleapis.com/revoke".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            client_id: "860836366947.apps.googleusercontent.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.scope, "email profile");
        assert_eq!(config.login_timeout(), None);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_validation_missing_client_id() {
        assert!(matches!(
            AuthConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__CLIENT_ID"))
        ));
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            userinfo_url: "http://localhost:9000/userinfo".to_string(),
            ..valid()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_zero_login_timeout() {
        let config = AuthConfig {
            login_timeout_secs: Some(0),
            ..valid()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_sign_in_settings_copies_client_and_scope() {
        let settings = valid().sign_in_settings();
        assert_eq!(settings.client_id, "860836366947.apps.googleusercontent.com");
        assert_eq!(settings.scope, "email profile");
    }

    #[test]
    fn test_login_timeout_duration() {
        let config = AuthConfig {
            login_timeout_secs: Some(120),
            ..valid()
        };
        assert_eq!(config.login_timeout(), Some(Duration::from_secs(120)));
    }
}
