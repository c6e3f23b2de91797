//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured `client.log_level`
//! directive is used.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ClientConfig, LogFormat};

/// Builds the filter for the given client configuration.
pub fn env_filter(config: &ClientConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Installs the global subscriber.
///
/// Returns an error if a global subscriber is already set.
pub fn init(config: &ClientConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directive_is_used_without_rust_log() {
        let config = ClientConfig::default();

        if std::env::var("RUST_LOG").is_err() {
            assert!(env_filter(&config)
                .to_string()
                .contains("conference_central=debug"));
        }
    }

    #[test]
    fn second_init_is_rejected() {
        let config = ClientConfig::default();

        let _ = init(&config);

        assert!(init(&config).is_err());
    }
}
