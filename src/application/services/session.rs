//! SessionService - conference sessions.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{encode, key_param, no_params, RpcEndpoint};
use crate::application::{decode, RemoteCallLifecycle};
use crate::domain::conference::{ConferenceSession, SessionForm, SessionType};
use crate::domain::remote_call::{PendingFlags, RemoteCallResult};
use crate::ports::{RpcTransport, TransportError};

/// Session list views share one scope so only the latest listing lands.
const LIST_SCOPE: &str = "session-list";

#[derive(Clone)]
pub struct SessionService {
    endpoint: RpcEndpoint,
}

impl SessionService {
    pub fn new(lifecycle: RemoteCallLifecycle, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            endpoint: RpcEndpoint::new(lifecycle, transport),
        }
    }

    pub fn flags(&self) -> Arc<PendingFlags> {
        Arc::clone(&self.endpoint.flags)
    }

    pub async fn all_sessions(&self) -> RemoteCallResult<Vec<ConferenceSession>> {
        self.list("query sessions", "getAllSessions", no_params()).await
    }

    pub async fn conference_sessions(
        &self,
        websafe_conference_key: &str,
    ) -> RemoteCallResult<Vec<ConferenceSession>> {
        self.list(
            "query conference sessions",
            "getConferenceSessions",
            key_param("websafeConferenceKey", websafe_conference_key),
        )
        .await
    }

    pub async fn sessions_by_speaker(
        &self,
        speaker_user_id: &str,
    ) -> RemoteCallResult<Vec<ConferenceSession>> {
        self.list(
            "query sessions",
            "getSessionsBySpeaker",
            key_param("speakerUserId", speaker_user_id),
        )
        .await
    }

    /// Sessions before 7pm that are not workshops.
    pub async fn daytime_non_workshop_sessions(&self) -> RemoteCallResult<Vec<ConferenceSession>> {
        self.list(
            "query early sessions",
            "getDaytimeNonWorkshopSessions",
            no_params(),
        )
        .await
    }

    pub async fn sessions_by_type(
        &self,
        session_type: SessionType,
        websafe_conference_key: &str,
    ) -> RemoteCallResult<Vec<ConferenceSession>> {
        let params = json!({
            "sessionType": session_type.as_str(),
            "websafeConferenceKey": websafe_conference_key,
        });
        self.list("query sessions", "getAllSessionsByType", Ok(params)).await
    }

    pub async fn create_session(&self, form: &SessionForm) -> RemoteCallResult<ConferenceSession> {
        self.endpoint
            .call("create a conference session")
            .decode_with(decode::result_body::<ConferenceSession>)
            .on_success(|session| {
                format!("The conference session has been created : {}", session.name)
            })
            .send(self.endpoint.execute("createConferenceSession", encode(form)))
            .await
    }

    pub async fn get_session(&self, websafe_session_key: &str) -> RemoteCallResult<ConferenceSession> {
        self.endpoint
            .call("get the conference session")
            .decode_with(decode::result_body::<ConferenceSession>)
            .on_success(|_| "Found the conference session".to_string())
            .send(self.endpoint.execute(
                "getConferenceSession",
                key_param("websafeSessionKey", websafe_session_key),
            ))
            .await
    }

    pub async fn delete_session(&self, websafe_session_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("remove session")
            .decode_with(decode::unit)
            .on_success(|_| "Session Removed".to_string())
            .send(self.endpoint.execute(
                "deleteConferenceSession",
                key_param("websafeSessionKey", websafe_session_key),
            ))
            .await
    }

    async fn list(
        &self,
        action: &str,
        method: &str,
        params: Result<Value, TransportError>,
    ) -> RemoteCallResult<Vec<ConferenceSession>> {
        self.endpoint
            .call(action)
            .in_scope(LIST_SCOPE)
            .decode_with(decode::items::<ConferenceSession>)
            .on_success(|_| "Query succeeded".to_string())
            .send(self.endpoint.execute(method, params))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn sessions_by_type_sends_wire_type() {
        let transport = test_support::transport();
        transport.respond(
            "getAllSessionsByType",
            json!({"items": [{"name": "Hands-on", "typeOfSession": "WORKSHOP"}]}),
        );
        let service = SessionService::new(test_support::lifecycle(), transport.clone());

        let result = service.sessions_by_type(SessionType::Workshop, "agxk").await;

        let sessions = result.data().unwrap();
        assert_eq!(sessions[0].type_of_session, SessionType::Workshop);
        assert_eq!(
            transport.last_params("getAllSessionsByType"),
            Some(json!({"sessionType": "WORKSHOP", "websafeConferenceKey": "agxk"}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn conference_sessions_default_to_empty() {
        let transport = test_support::transport();
        transport.respond("getConferenceSessions", json!({"result": {}}));
        let service = SessionService::new(test_support::lifecycle(), transport);

        let result = service.conference_sessions("agxk").await;

        assert_eq!(result.data().map(Vec::len), Some(0));
        assert_eq!(result.message(), "Query succeeded");
    }

    #[tokio::test(start_paused = true)]
    async fn create_session_reports_name() {
        let transport = test_support::transport();
        transport.respond(
            "createConferenceSession",
            json!({"result": {"name": "Intro to Rust"}}),
        );
        let service = SessionService::new(test_support::lifecycle(), transport);
        let form = SessionForm {
            websafe_conference_key: "agxk".to_string(),
            name: "Intro to Rust".to_string(),
            ..SessionForm::default()
        };

        let result = service.create_session(&form).await;

        assert_eq!(
            result.message(),
            "The conference session has been created : Intro to Rust"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_by_speaker_uses_speaker_id() {
        let transport = test_support::transport();
        let service = SessionService::new(test_support::lifecycle(), transport.clone());

        service.sessions_by_speaker("speaker-1").await;

        assert_eq!(
            transport.last_params("getSessionsBySpeaker"),
            Some(json!({"speakerUserId": "speaker-1"}))
        );
    }
}
