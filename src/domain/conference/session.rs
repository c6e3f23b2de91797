//! Conference sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a conference session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    #[default]
    Unknown,
    Workshop,
    Lecture,
    Keynote,
    Meetup,
}

impl SessionType {
    pub const ALL: [SessionType; 5] = [
        SessionType::Unknown,
        SessionType::Workshop,
        SessionType::Lecture,
        SessionType::Keynote,
        SessionType::Meetup,
    ];

    /// Wire name of the session type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Unknown => "UNKNOWN",
            SessionType::Workshop => "WORKSHOP",
            SessionType::Lecture => "LECTURE",
            SessionType::Keynote => "KEYNOTE",
            SessionType::Meetup => "MEETUP",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conference session as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConferenceSession {
    pub name: String,
    pub highlights: Option<String>,
    pub speaker_user_id: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<i32>,
    pub type_of_session: SessionType,
    pub date: Option<String>,
    pub websafe_session_key: Option<String>,
    pub speaker_display_name: Option<String>,
}

/// Fields sent when creating a session inside a conference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionForm {
    pub websafe_conference_key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub type_of_session: SessionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
