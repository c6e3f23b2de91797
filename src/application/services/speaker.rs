//! SpeakerService - speakers and the featured speaker.

use std::sync::Arc;

use super::{encode, key_param, no_params, RpcEndpoint};
use crate::application::{decode, RemoteCallLifecycle};
use crate::domain::conference::{Speaker, SpeakerForm};
use crate::domain::remote_call::{MalformedResponse, PendingFlags, RawResponse, RemoteCallResult};
use crate::ports::RpcTransport;

#[derive(Clone)]
pub struct SpeakerService {
    endpoint: RpcEndpoint,
}

impl SpeakerService {
    pub fn new(lifecycle: RemoteCallLifecycle, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            endpoint: RpcEndpoint::new(lifecycle, transport),
        }
    }

    pub fn flags(&self) -> Arc<PendingFlags> {
        Arc::clone(&self.endpoint.flags)
    }

    pub async fn create_speaker(&self, form: &SpeakerForm) -> RemoteCallResult<Speaker> {
        self.endpoint
            .call("create a speaker")
            .decode_with(decode::result_body::<Speaker>)
            .on_success(|speaker| format!("Speaker has been created: {}", speaker.label()))
            .send(self.endpoint.execute("createSpeaker", encode(form)))
            .await
    }

    pub async fn speakers(&self) -> RemoteCallResult<Vec<Speaker>> {
        self.endpoint
            .call("retrieve speakers")
            .decode_with(speaker_list)
            .on_success(|speakers| {
                format!("Successfully retrieved a list of {} Speakers", speakers.len())
            })
            .send(self.endpoint.execute("getSpeakers", no_params()))
            .await
    }

    pub async fn get_speaker(&self, websafe_speaker_key: &str) -> RemoteCallResult<Speaker> {
        self.endpoint
            .call("get the speaker")
            .decode_with(decode::result_body::<Speaker>)
            .on_success(|_| "Found a speaker".to_string())
            .send(self.endpoint.execute(
                "getSpeaker",
                key_param("websafeSpeakerKey", websafe_speaker_key),
            ))
            .await
    }

    /// The featured speaker announcement, as plain text.
    pub async fn featured_speaker(&self, websafe_speaker_key: &str) -> RemoteCallResult<String> {
        self.endpoint
            .call("get the featured speaker")
            .decode_with(featured_text)
            .on_success(|_| "Featured speaker".to_string())
            .send(self.endpoint.execute(
                "getFeaturedSpeaker",
                key_param("websafeSpeakerKey", websafe_speaker_key),
            ))
            .await
    }

    pub async fn save_speaker(&self, websafe_speaker_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("save changes for the speaker")
            .decode_with(decode::unit)
            .on_success(|_| "Saved changes for the speaker".to_string())
            .send(self.endpoint.execute(
                "saveSpeaker",
                key_param("websafeSpeakerKey", websafe_speaker_key),
            ))
            .await
    }

    pub async fn remove_speaker(&self, websafe_speaker_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("remove the speaker")
            .decode_with(decode::unit)
            .on_success(|_| "Removed the speaker".to_string())
            .send(self.endpoint.execute(
                "removeSpeaker",
                key_param("websafeSpeakerKey", websafe_speaker_key),
            ))
            .await
    }

    pub async fn conference_speakers(
        &self,
        websafe_conference_key: &str,
    ) -> RemoteCallResult<Vec<Speaker>> {
        self.endpoint
            .call("get conference speakers")
            .decode_with(speaker_list)
            .on_success(|_| "Found conference speakers".to_string())
            .send(self.endpoint.execute(
                "getConferenceSpeakers",
                key_param("websafeConferenceKey", websafe_conference_key),
            ))
            .await
    }
}

fn speaker_list(raw: &RawResponse) -> Result<Vec<Speaker>, MalformedResponse> {
    decode::list_field(raw, "speakers")
}

fn featured_text(raw: &RawResponse) -> Result<String, MalformedResponse> {
    decode::data_field(raw, "data")
}
