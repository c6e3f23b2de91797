//! Feature services - typed wrappers over the API's methods.
//!
//! Each service runs its calls through the shared [`RemoteCallLifecycle`]
//! with its own pending flags, a per-method decoder and the status message
//! users see on success.

mod conference;
mod profile;
mod registration;
mod session;
mod speaker;
mod wishlist;

pub use conference::ConferenceService;
pub use profile::ProfileService;
pub use registration::RegistrationService;
pub use session::SessionService;
pub use speaker::SpeakerService;
pub use wishlist::WishlistService;

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::application::{RemoteCall, RemoteCallLifecycle};
use crate::domain::remote_call::{PendingFlags, RawResponse};
use crate::ports::{RpcTransport, TransportError};

/// What every service needs to reach the API.
#[derive(Clone)]
struct RpcEndpoint {
    lifecycle: RemoteCallLifecycle,
    transport: Arc<dyn RpcTransport>,
    flags: Arc<PendingFlags>,
}

impl RpcEndpoint {
    fn new(lifecycle: RemoteCallLifecycle, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            lifecycle,
            transport,
            flags: Arc::new(PendingFlags::new()),
        }
    }

    fn call(&self, action: &str) -> RemoteCall<'_, Value> {
        self.lifecycle.call(action).with_flags(Arc::clone(&self.flags))
    }

    fn execute<'a>(
        &'a self,
        method: &'a str,
        params: Result<Value, TransportError>,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + 'a {
        async move { self.transport.execute(method, params?).await }
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Value, TransportError> {
    serde_json::to_value(payload).map_err(|e| TransportError::Encode(e.to_string()))
}

fn key_param(name: &str, key: &str) -> Result<Value, TransportError> {
    Ok(json!({ name: key }))
}

fn no_params() -> Result<Value, TransportError> {
    Ok(json!({}))
}
