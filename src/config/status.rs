//! Status message configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Status message configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// Milliseconds a status message stays visible
    #[serde(default = "default_clear_after_ms")]
    pub clear_after_ms: u64,
}

impl StatusConfig {
    /// Get the auto-clear delay as Duration
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }

    /// Validate status configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.clear_after_ms == 0 {
            return Err(ValidationError::InvalidClearDelay);
        }
        Ok(())
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            clear_after_ms: default_clear_after_ms(),
        }
    }
}

fn default_clear_after_ms() -> u64 {
    5000
}
