//! Speakers.

use serde::{Deserialize, Serialize};

/// A speaker as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Speaker {
    pub display_name: Option<String>,
    pub main_email: String,
    pub session_keys_to_speak_at: Vec<String>,
    pub websafe_speaker_key: Option<String>,
}

impl Speaker {
    /// Name to show in lists, falling back to the email.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.main_email)
    }
}

/// Fields sent when creating a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerForm {
    pub display_name: String,
    pub main_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_falls_back_to_email() {
        let speaker: Speaker =
            serde_json::from_value(json!({"mainEmail": "grace@example.com"})).unwrap();
        assert_eq!(speaker.label(), "grace@example.com");
        assert!(speaker.session_keys_to_speak_at.is_empty());
    }

    #[test]
    fn form_uses_wire_names() {
        let form = SpeakerForm {
            display_name: "Grace".to_string(),
            main_email: "grace@example.com".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({"displayName": "Grace", "mainEmail": "grace@example.com"})
        );
    }
}
