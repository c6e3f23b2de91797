//! API endpoint configuration

use serde::Deserialize;
use std::time::Duration;

use super::client::Environment;
use super::error::ValidationError;

/// Remote API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://my-app.appspot.com/_ah/api`
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// API name used as the method prefix
    #[serde(default = "default_api_name")]
    pub api_name: String,

    /// API version
    #[serde(default = "default_version")]
    pub version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate API configuration
    ///
    /// In production, requires HTTPS for the root URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.root_url.is_empty() {
            return Err(ValidationError::MissingRequired("API__ROOT_URL"));
        }
        if !self.root_url.starts_with("http://") && !self.root_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("API__ROOT_URL"));
        }
        if self.api_name.is_empty() {
            return Err(ValidationError::MissingRequired("API__API_NAME"));
        }
        if self.version.is_empty() {
            return Err(ValidationError::MissingRequired("API__VERSION"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if *environment == Environment::Production && !self.root_url.starts_with("https://") {
            return Err(ValidationError::HttpsRequired("API__ROOT_URL"));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            api_name: default_api_name(),
            version: default_version(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_root_url() -> String {
    "http://localhost:8080/_ah/api".to_string()
}

fn default_api_name() -> String {
    "conference".to_string()
}

fn default_version() -> String {
    "v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.api_name, "conference");
        assert_eq!(config.version, "v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_defaults_are_valid_in_development() {
        assert!(ApiConfig::default().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = ApiConfig {
            root_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = ApiConfig::default();
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::HttpsRequired(_))
        ));

        let config = ApiConfig {
            root_url: "https://conference-central.appspot.com/_ah/api".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());

        let config = ApiConfig {
            timeout_secs: 500,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }
}
