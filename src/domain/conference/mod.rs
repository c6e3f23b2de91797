//! Conference Central records as exchanged with the API.
//!
//! Field names follow the API's camelCase wire names. The API omits empty
//! repeated fields, so every list defaults to empty on decode.

mod conference;
mod profile;
mod query;
mod session;
mod speaker;

pub use conference::{Conference, ConferenceForm};
pub use profile::{Profile, ProfileDraft, ProfileMiniForm, TeeShirtSize};
pub use query::{ConferenceQuery, FilterOperator, QueryFilter, SearchFilter};
pub use session::{ConferenceSession, SessionForm, SessionType};
pub use speaker::{Speaker, SpeakerForm};
