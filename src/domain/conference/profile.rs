//! User profile and the locally edited copy of it.

use serde::{Deserialize, Serialize};

/// T-shirt size offered on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TeeShirtSize {
    #[default]
    #[serde(rename = "NOT_SPECIFIED")]
    NotSpecified,
    #[serde(rename = "XS_M")]
    XsMen,
    #[serde(rename = "XS_W")]
    XsWomen,
    #[serde(rename = "S_M")]
    SMen,
    #[serde(rename = "S_W")]
    SWomen,
    #[serde(rename = "M_M")]
    MMen,
    #[serde(rename = "M_W")]
    MWomen,
    #[serde(rename = "L_M")]
    LMen,
    #[serde(rename = "L_W")]
    LWomen,
    #[serde(rename = "XL_M")]
    XlMen,
    #[serde(rename = "XL_W")]
    XlWomen,
    #[serde(rename = "XXL_M")]
    XxlMen,
    #[serde(rename = "XXL_W")]
    XxlWomen,
    #[serde(rename = "XXXL_M")]
    XxxlMen,
    #[serde(rename = "XXXL_W")]
    XxxlWomen,
}

impl TeeShirtSize {
    /// Human-readable label, e.g. "XL - Women's".
    pub fn label(&self) -> &'static str {
        use TeeShirtSize::*;
        match self {
            NotSpecified => "Not specified",
            XsMen => "XS - Men's",
            XsWomen => "XS - Women's",
            SMen => "S - Men's",
            SWomen => "S - Women's",
            MMen => "M - Men's",
            MWomen => "M - Women's",
            LMen => "L - Men's",
            LWomen => "L - Women's",
            XlMen => "XL - Men's",
            XlWomen => "XL - Women's",
            XxlMen => "XXL - Men's",
            XxlWomen => "XXL - Women's",
            XxxlMen => "XXXL - Men's",
            XxxlWomen => "XXXL - Women's",
        }
    }
}

/// The signed-in user's profile as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub display_name: Option<String>,
    pub main_email: Option<String>,
    pub tee_shirt_size: TeeShirtSize,
    pub conference_keys_to_attend: Vec<String>,
}

/// The editable subset of a profile sent on save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMiniForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub tee_shirt_size: TeeShirtSize,
}

/// Local copy of the profile being edited.
///
/// Keeps the profile as last loaded so the view can tell whether the
/// user changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    initial: Option<Profile>,
    pub display_name: Option<String>,
    pub tee_shirt_size: TeeShirtSize,
}

impl ProfileDraft {
    /// Replaces the draft with a freshly loaded profile.
    pub fn set(&mut self, profile: Profile) {
        self.display_name = profile.display_name.clone();
        self.tee_shirt_size = profile.tee_shirt_size;
        self.initial = Some(profile);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn initial(&self) -> Option<&Profile> {
        self.initial.as_ref()
    }

    /// Returns true if the editable fields differ from the loaded profile.
    pub fn is_modified(&self) -> bool {
        match &self.initial {
            Some(initial) => {
                initial.display_name != self.display_name
                    || initial.tee_shirt_size != self.tee_shirt_size
            }
            None => self.display_name.is_some() || self.tee_shirt_size != TeeShirtSize::NotSpecified,
        }
    }

    /// Builds the save payload from the draft.
    pub fn to_form(&self) -> ProfileMiniForm {
        ProfileMiniForm {
            display_name: self.display_name.clone(),
            tee_shirt_size: self.tee_shirt_size,
        }
    }

    /// Marks the current draft as saved.
    pub fn commit(&mut self) {
        let mut saved = self.initial.take().unwrap_or_default();
        saved.display_name = self.display_name.clone();
        saved.tee_shirt_size = self.tee_shirt_size;
        self.initial = Some(saved);
    }
}
