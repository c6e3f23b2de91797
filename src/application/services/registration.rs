//! RegistrationService - attend or leave a conference.

use std::sync::Arc;

use super::{key_param, RpcEndpoint};
use crate::application::{decode, RemoteCallLifecycle};
use crate::domain::remote_call::{PendingFlags, RemoteCallResult};
use crate::ports::RpcTransport;

#[derive(Clone)]
pub struct RegistrationService {
    endpoint: RpcEndpoint,
}

impl RegistrationService {
    pub fn new(lifecycle: RemoteCallLifecycle, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            endpoint: RpcEndpoint::new(lifecycle, transport),
        }
    }

    pub fn flags(&self) -> Arc<PendingFlags> {
        Arc::clone(&self.endpoint.flags)
    }

    pub async fn register(&self, websafe_conference_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("register for the conference")
            .decode_with(decode::unit)
            .on_success(|_| "Registered for the conference".to_string())
            .send(self.endpoint.execute(
                "registerForConference",
                key_param("websafeConferenceKey", websafe_conference_key),
            ))
            .await
    }

    pub async fn unregister(&self, websafe_conference_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("unregister from the conference")
            .decode_with(decode::unit)
            .on_success(|_| "Unregistered from the conference".to_string())
            .send(self.endpoint.execute(
                "unregisterFromConference",
                key_param("websafeConferenceKey", websafe_conference_key),
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support;
    use crate::domain::remote_call::ErrorKind;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn register_reports_success() {
        let transport = test_support::transport();
        let lifecycle = test_support::lifecycle();
        let service = RegistrationService::new(lifecycle.clone(), transport.clone());

        let result = service.register("agxk").await;

        assert!(result.is_success());
        assert_eq!(
            lifecycle.status().current().message,
            "Registered for the conference"
        );
        assert_eq!(transport.call_count("registerForConference"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_unregister_names_the_action() {
        let transport = test_support::transport();
        transport.respond(
            "unregisterFromConference",
            json!({"error": {"code": 404, "message": "No conference found"}}),
        );
        let service = RegistrationService::new(test_support::lifecycle(), transport);

        let result = service.unregister("missing").await;

        assert_eq!(result.kind(), Some(ErrorKind::Remote));
        assert_eq!(
            result.message(),
            "Failed to unregister from the conference: No conference found"
        );
        assert!(service.flags().is_submitted());
    }
}
