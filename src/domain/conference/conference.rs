//! Conferences.

use serde::{Deserialize, Serialize};

/// A conference as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conference {
    pub name: String,
    pub description: Option<String>,
    pub organizer_user_id: Option<String>,
    pub topics: Vec<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub month: Option<i32>,
    pub max_attendees: Option<i32>,
    pub seats_available: Option<i32>,
    pub end_date: Option<String>,
    pub websafe_conference_key: Option<String>,
    pub organizer_display_name: Option<String>,
}

impl Conference {
    /// Returns true if the conference has no seats left.
    pub fn is_full(&self) -> bool {
        self.seats_available == Some(0)
    }
}

/// Fields sent when creating a conference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i32>,
}

impl ConferenceForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
