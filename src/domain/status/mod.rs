//! User-visible transient status.

use std::fmt;

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Alert level of the current status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Warning,
    Info,
    #[default]
    None,
}

impl StatusLevel {
    /// Returns the alert class name used by views.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Success => "success",
            StatusLevel::Warning => "warning",
            StatusLevel::Info => "info",
            StatusLevel::None => "",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the status shown to the user.
///
/// A cleared status has level `None`, an empty message and no expiry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusState {
    pub level: StatusLevel,
    pub message: String,
    pub expires_at: Option<Timestamp>,
}

impl StatusState {
    /// Creates a status that expires at the given time.
    pub fn new(level: StatusLevel, message: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            level,
            message: message.into(),
            expires_at: Some(expires_at),
        }
    }

    /// The empty status.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Returns true if nothing is being shown.
    pub fn is_cleared(&self) -> bool {
        self.level == StatusLevel::None && self.message.is_empty()
    }
}
