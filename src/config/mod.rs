//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONFERENCE_CENTRAL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use conference_central::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Calling {}", config.api.root_url);
//! ```

mod api;
mod auth;
mod client;
mod error;
mod status;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use client::{ClientConfig, Environment, LogFormat};
pub use error::{ConfigError, ValidationError};
pub use status::StatusConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Client runtime configuration (environment, logging)
    #[serde(default)]
    pub client: ClientConfig,

    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Authentication configuration (OAuth2 provider)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Status message configuration
    #[serde(default)]
    pub status: StatusConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CONFERENCE_CENTRAL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CONFERENCE_CENTRAL__API__ROOT_URL=...` -> `api.root_url = ...`
    /// - `CONFERENCE_CENTRAL__AUTH__CLIENT_ID=...` -> `auth.client_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONFERENCE_CENTRAL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate(&self.client.environment)?;
        self.auth.validate(&self.client.environment)?;
        self.status.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.client.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global, so these tests run one at a time
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CONFERENCE_CENTRAL__AUTH__CLIENT_ID", "client-id");
    }

    fn clear_env() {
        for key in [
            "CONFERENCE_CENTRAL__AUTH__CLIENT_ID",
            "CONFERENCE_CENTRAL__AUTH__ACCESS_TOKEN",
            "CONFERENCE_CENTRAL__API__ROOT_URL",
            "CONFERENCE_CENTRAL__API__TIMEOUT_SECS",
            "CONFERENCE_CENTRAL__STATUS__CLEAR_AFTER_MS",
            "CONFERENCE_CENTRAL__CLIENT__ENVIRONMENT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CONFERENCE_CENTRAL__API__ROOT_URL", "https://conf.example.com/_ah/api");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.auth.client_id, "client-id");
        assert_eq!(config.api.root_url, "https://conf.example.com/_ah/api");
    }

    #[test]
    fn test_validate_minimal_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.status.clear_after_ms, 5000);
        assert_eq!(config.client.environment, Environment::Development);
        assert!(config.validate().is_err(), "client id is required");
    }

    #[test]
    fn test_numeric_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CONFERENCE_CENTRAL__STATUS__CLEAR_AFTER_MS", "2500");
        env::set_var("CONFERENCE_CENTRAL__API__TIMEOUT_SECS", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.status.clear_after_ms, 2500);
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_access_token_is_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CONFERENCE_CENTRAL__AUTH__ACCESS_TOKEN", "ya29.token");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let token = config.auth.access_token.as_ref().unwrap();
        assert_eq!(token.expose_secret(), "ya29.token");
        assert!(!format!("{:?}", config.auth).contains("ya29.token"));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CONFERENCE_CENTRAL__CLIENT__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }
}
