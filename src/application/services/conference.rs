//! ConferenceService - create, query and remove conferences.

use std::sync::Arc;

use super::{encode, key_param, no_params, RpcEndpoint};
use crate::application::{decode, RemoteCallLifecycle};
use crate::domain::conference::{Conference, ConferenceForm, ConferenceQuery};
use crate::domain::remote_call::{PendingFlags, RemoteCallResult};
use crate::ports::RpcTransport;

/// Conference list views share one scope so only the latest listing lands.
const LIST_SCOPE: &str = "conference-list";

#[derive(Clone)]
pub struct ConferenceService {
    endpoint: RpcEndpoint,
}

impl ConferenceService {
    pub fn new(lifecycle: RemoteCallLifecycle, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            endpoint: RpcEndpoint::new(lifecycle, transport),
        }
    }

    pub fn flags(&self) -> Arc<PendingFlags> {
        Arc::clone(&self.endpoint.flags)
    }

    pub async fn create_conference(&self, form: &ConferenceForm) -> RemoteCallResult<Conference> {
        self.endpoint
            .call("create a conference")
            .decode_with(decode::result_body::<Conference>)
            .on_success(|conference| {
                format!("The conference has been created : {}", conference.name)
            })
            .send(self.endpoint.execute("createConference", encode(form)))
            .await
    }

    pub async fn query_conferences(
        &self,
        query: &ConferenceQuery,
    ) -> RemoteCallResult<Vec<Conference>> {
        self.endpoint
            .call("query conferences")
            .in_scope(LIST_SCOPE)
            .decode_with(decode::items::<Conference>)
            .on_success(|_| "Query succeeded".to_string())
            .send(self.endpoint.execute("queryConferences", encode(query)))
            .await
    }

    pub async fn conferences_created(&self) -> RemoteCallResult<Vec<Conference>> {
        self.endpoint
            .call("query the conferences created")
            .in_scope(LIST_SCOPE)
            .decode_with(decode::items::<Conference>)
            .on_success(|_| "Query succeeded : Conferences you have created".to_string())
            .send(self.endpoint.execute("getConferencesCreated", no_params()))
            .await
    }

    pub async fn conferences_to_attend(&self) -> RemoteCallResult<Vec<Conference>> {
        self.endpoint
            .call("query conferences to attend")
            .in_scope(LIST_SCOPE)
            .decode_with(decode::items::<Conference>)
            .on_success(|_| {
                "Query succeeded : Conferences you will attend (or you have attended)".to_string()
            })
            .send(self.endpoint.execute("getConferencesToAttend", no_params()))
            .await
    }

    pub async fn get_conference(&self, websafe_key: &str) -> RemoteCallResult<Conference> {
        self.endpoint
            .call("get the conference")
            .decode_with(decode::result_body::<Conference>)
            .on_success(|_| "Query succeeded".to_string())
            .send(
                self.endpoint
                    .execute("getConference", key_param("websafeConferenceKey", websafe_key)),
            )
            .await
    }

    pub async fn delete_conference(&self, websafe_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("remove conference")
            .decode_with(decode::unit)
            .on_success(|_| "Removed the conference".to_string())
            .send(
                self.endpoint
                    .execute("deleteConference", key_param("websafeConferenceKey", websafe_key)),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support;
    use crate::domain::conference::SearchFilter;
    use crate::domain::remote_call::{ErrorKind, PendingSnapshot};
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn create_conference_reports_name() {
        let transport = test_support::transport();
        transport.respond("createConference", json!({"result": {"name": "DevCon"}}));
        let lifecycle = test_support::lifecycle();
        let service = ConferenceService::new(lifecycle.clone(), transport.clone());

        let result = service.create_conference(&ConferenceForm::new("DevCon")).await;

        assert_eq!(result.data().map(|c| c.name.as_str()), Some("DevCon"));
        assert_eq!(
            lifecycle.status().current().message,
            "The conference has been created : DevCon"
        );
        assert_eq!(service.flags().snapshot(), PendingSnapshot::default());
        assert_eq!(
            transport.last_params("createConference"),
            Some(json!({"name": "DevCon"}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn query_conferences_sends_filters() {
        let transport = test_support::transport();
        transport.respond(
            "queryConferences",
            json!({"items": [{"name": "RustConf", "city": "Portland"}]}),
        );
        let service = ConferenceService::new(test_support::lifecycle(), transport.clone());
        let mut filter = SearchFilter::new([("city", "City")]);
        filter.add_filter("city", "Portland").unwrap();

        let result = service.query_conferences(&filter.to_query()).await;

        assert_eq!(result.data().map(Vec::len), Some(1));
        assert_eq!(
            transport.last_params("queryConferences"),
            Some(json!({"filters": [{"field": "CITY", "operator": "EQ", "value": "Portland"}]}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn conferences_to_attend_reads_nested_items() {
        let transport = test_support::transport();
        transport.respond(
            "getConferencesToAttend",
            json!({"result": {"items": [{"name": "A"}, {"name": "B"}]}}),
        );
        let service = ConferenceService::new(test_support::lifecycle(), transport);

        let result = service.conferences_to_attend().await;

        assert_eq!(result.data().map(Vec::len), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_listing_decodes_as_empty() {
        let transport = test_support::transport();
        transport.respond("getConferencesCreated", json!({}));
        let service = ConferenceService::new(test_support::lifecycle(), transport);

        let result = service.conferences_created().await;

        assert_eq!(result.data(), Some(&Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn unauthorized_query_is_classified() {
        let transport = test_support::transport();
        transport.respond("queryConferences", json!({"error": {"code": 401}}));
        let service = ConferenceService::new(test_support::lifecycle(), transport);

        let result = service.query_conferences(&ConferenceQuery::default()).await;

        assert_eq!(result.kind(), Some(ErrorKind::Unauthorized));
    }

    #[tokio::test(start_paused = true)]
    async fn delete_conference_passes_key() {
        let transport = test_support::transport();
        let lifecycle = test_support::lifecycle();
        let service = ConferenceService::new(lifecycle.clone(), transport.clone());

        let result = service.delete_conference("agxk").await;

        assert!(result.is_success());
        assert_eq!(lifecycle.status().current().message, "Removed the conference");
        assert_eq!(
            transport.last_params("deleteConference"),
            Some(json!({"websafeConferenceKey": "agxk"}))
        );
    }
}
