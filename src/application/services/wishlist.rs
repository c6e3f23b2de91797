//! WishlistService - sessions the user wants to attend.

use std::sync::Arc;

use super::{key_param, no_params, RpcEndpoint};
use crate::application::{decode, RemoteCallLifecycle};
use crate::domain::conference::ConferenceSession;
use crate::domain::remote_call::{MalformedResponse, PendingFlags, RawResponse, RemoteCallResult};
use crate::ports::RpcTransport;

#[derive(Clone)]
pub struct WishlistService {
    endpoint: RpcEndpoint,
}

impl WishlistService {
    pub fn new(lifecycle: RemoteCallLifecycle, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            endpoint: RpcEndpoint::new(lifecycle, transport),
        }
    }

    pub fn flags(&self) -> Arc<PendingFlags> {
        Arc::clone(&self.endpoint.flags)
    }

    pub async fn sessions_in_wishlist(&self) -> RemoteCallResult<Vec<ConferenceSession>> {
        self.endpoint
            .call("retrieve a wishlist")
            .decode_with(wishlist_sessions)
            .on_success(|_| "Query succeeded".to_string())
            .send(self.endpoint.execute("getSessionsInWishlist", no_params()))
            .await
    }

    pub async fn add_session(&self, websafe_session_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("add session to wishlist")
            .decode_with(decode::unit)
            .on_success(|_| "Session added to wishlist".to_string())
            .send(self.endpoint.execute(
                "addSessionToWishlist",
                key_param("websafeSessionKey", websafe_session_key),
            ))
            .await
    }

    pub async fn remove_session(&self, websafe_session_key: &str) -> RemoteCallResult<()> {
        self.endpoint
            .call("remove session from wishlist")
            .decode_with(decode::unit)
            .on_success(|_| "Session removed from wishlist".to_string())
            .send(self.endpoint.execute(
                "deleteSessionInWishlist",
                key_param("websafeSessionKey", websafe_session_key),
            ))
            .await
    }
}

fn wishlist_sessions(raw: &RawResponse) -> Result<Vec<ConferenceSession>, MalformedResponse> {
    decode::list_field(raw, "sessions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support;
    use crate::domain::remote_call::ErrorKind;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn wishlist_reads_sessions_member() {
        let transport = test_support::transport();
        transport.respond(
            "getSessionsInWishlist",
            json!({"sessions": [{"name": "Keynote"}]}),
        );
        let service = WishlistService::new(test_support::lifecycle(), transport);

        let result = service.sessions_in_wishlist().await;

        assert_eq!(result.data().unwrap()[0].name, "Keynote");
    }

    #[tokio::test(start_paused = true)]
    async fn add_session_reports_success() {
        let transport = test_support::transport();
        let lifecycle = test_support::lifecycle();
        let service = WishlistService::new(lifecycle.clone(), transport.clone());

        service.add_session("session-1").await;

        assert_eq!(lifecycle.status().current().message, "Session added to wishlist");
        assert_eq!(
            transport.last_params("addSessionToWishlist"),
            Some(json!({"websafeSessionKey": "session-1"}))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn remove_session_failure_names_action() {
        let transport = test_support::transport();
        transport.respond(
            "deleteSessionInWishlist",
            json!({"error": {"code": 404, "message": "Not in wishlist"}}),
        );
        let service = WishlistService::new(test_support::lifecycle(), transport);

        let result = service.remove_session("session-1").await;

        assert_eq!(result.kind(), Some(ErrorKind::Remote));
        assert!(result.message().contains("remove session from wishlist"));
    }
}
