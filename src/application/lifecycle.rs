//! RemoteCallLifecycle - one place for the dispatch/settle/report cycle of a
//! remote call.
//!
//! A call raises its pending flags, awaits the transport, drops the outcome
//! if a newer call in the same scope has been dispatched since, and otherwise
//! classifies it, updates the status line and hands back a
//! [`RemoteCallResult`].

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;

use crate::application::status_tracker::action_or_default;
use crate::application::{StatusTracker, UnauthorizedHandler};
use crate::domain::remote_call::{
    ErrorKind, MalformedResponse, PendingFlags, RawResponse, RemoteCallResult, RequestTokens,
};
use crate::ports::TransportError;

/// Status shown when a call comes back unauthorized.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please login";

type Decoder<T> = Box<dyn FnOnce(&RawResponse) -> Result<T, MalformedResponse> + Send>;
type Describe<T> = Box<dyn FnOnce(&T) -> String + Send>;

/// Runs remote calls against the shared status line and auth session.
#[derive(Debug, Clone)]
pub struct RemoteCallLifecycle {
    status: StatusTracker,
    unauthorized: UnauthorizedHandler,
    tokens: Arc<RequestTokens>,
}

impl RemoteCallLifecycle {
    pub fn new(status: StatusTracker, unauthorized: UnauthorizedHandler) -> Self {
        Self {
            status,
            unauthorized,
            tokens: Arc::new(RequestTokens::new()),
        }
    }

    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    pub fn unauthorized(&self) -> &UnauthorizedHandler {
        &self.unauthorized
    }

    /// Starts building a call described by `action`, e.g. `"query conferences"`.
    pub fn call(&self, action: impl Into<String>) -> RemoteCall<'_, Value> {
        RemoteCall {
            lifecycle: self,
            action: action.into(),
            scope: None,
            flags: Arc::new(PendingFlags::new()),
            decode: Box::new(whole_response),
            describe: None,
        }
    }

    /// Runs `transport_call` with default options and returns the raw
    /// response value on success.
    pub fn invoke<'a, F>(
        &'a self,
        action: &str,
        transport_call: F,
    ) -> impl Future<Output = RemoteCallResult<Value>> + 'a
    where
        F: Future<Output = Result<RawResponse, TransportError>> + 'a,
    {
        self.call(action).send(transport_call)
    }

    fn settle<T>(
        &self,
        action: &str,
        outcome: Result<RawResponse, TransportError>,
        decode: Decoder<T>,
        describe: Option<Describe<T>>,
        flags: &PendingFlags,
    ) -> RemoteCallResult<T> {
        let raw = match outcome {
            Ok(raw) => raw,
            Err(err) => {
                let message = self.status.report_error(action, Some(&err.to_string()));
                return RemoteCallResult::failure(err.kind(), message, None);
            }
        };

        match raw.error() {
            Err(malformed) => {
                let message = self
                    .status
                    .report_error(action, Some(&malformed.to_string()));
                RemoteCallResult::failure(ErrorKind::Malformed, message, None)
            }
            Ok(Some(error)) => {
                if self.unauthorized.check(error.code) {
                    let message = self.status.report_info(UNAUTHORIZED_MESSAGE);
                    return RemoteCallResult::failure(ErrorKind::Unauthorized, message, error.code);
                }
                let message = self.status.report_error(action, error.message.as_deref());
                RemoteCallResult::failure(ErrorKind::Remote, message, error.code)
            }
            Ok(None) => match decode(&raw) {
                Ok(data) => {
                    flags.clear_submitted();
                    let message = match describe {
                        Some(describe) => describe(&data),
                        None => format!("Request to {} succeeded", action),
                    };
                    let message = self.status.report_success(message);
                    RemoteCallResult::success(data, message)
                }
                Err(malformed) => {
                    let message = self
                        .status
                        .report_error(action, Some(&malformed.to_string()));
                    RemoteCallResult::failure(ErrorKind::Malformed, message, None)
                }
            },
        }
    }
}

/// Counts one call against its flags until dropped, even if the call's
/// future is dropped before it settles.
struct InFlight(Arc<PendingFlags>);

impl InFlight {
    fn begin(flags: Arc<PendingFlags>) -> Self {
        flags.begin();
        Self(flags)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.finish_loading();
    }
}

fn whole_response(raw: &RawResponse) -> Result<Value, MalformedResponse> {
    Ok(raw.as_value().clone())
}

/// Builder for a single remote call. Finish with [`send`](Self::send).
pub struct RemoteCall<'a, T> {
    lifecycle: &'a RemoteCallLifecycle,
    action: String,
    scope: Option<String>,
    flags: Arc<PendingFlags>,
    decode: Decoder<T>,
    describe: Option<Describe<T>>,
}

impl<'a, T> RemoteCall<'a, T> {
    /// Orders this call against other calls sharing `scope` instead of the
    /// action. Only the newest call in a scope gets its outcome applied.
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Uses caller-owned pending flags, e.g. the ones a view renders.
    pub fn with_flags(mut self, flags: Arc<PendingFlags>) -> Self {
        self.flags = flags;
        self
    }

    pub fn flags(&self) -> Arc<PendingFlags> {
        Arc::clone(&self.flags)
    }

    /// Decodes successful responses with `decode`.
    ///
    /// Resets any success message set earlier; call
    /// [`on_success`](Self::on_success) afterwards.
    pub fn decode_with<U, D>(self, decode: D) -> RemoteCall<'a, U>
    where
        D: FnOnce(&RawResponse) -> Result<U, MalformedResponse> + Send + 'static,
    {
        RemoteCall {
            lifecycle: self.lifecycle,
            action: self.action,
            scope: self.scope,
            flags: self.flags,
            decode: Box::new(decode),
            describe: None,
        }
    }

    /// Builds the success status message from the decoded data.
    pub fn on_success<D>(mut self, describe: D) -> Self
    where
        D: FnOnce(&T) -> String + Send + 'static,
    {
        self.describe = Some(Box::new(describe));
        self
    }

    /// Dispatches the call and returns a future resolving to its outcome.
    ///
    /// Flags are raised and the request token is issued right away, so call
    /// order is dispatch order even if the futures are polled later.
    pub fn send<F>(self, transport_call: F) -> impl Future<Output = RemoteCallResult<T>> + 'a
    where
        F: Future<Output = Result<RawResponse, TransportError>> + 'a,
        T: 'a,
    {
        let lifecycle = self.lifecycle;
        let action = action_or_default(&self.action).to_string();
        let scope = self.scope.unwrap_or_else(|| action.clone());
        let token = lifecycle.tokens.issue(&scope);
        let flags = self.flags;
        let decode = self.decode;
        let describe = self.describe;

        let span = tracing::info_span!(
            "remote_call",
            action = %action,
            scope = %scope,
            token = %token
        );

        let in_flight = InFlight::begin(Arc::clone(&flags));

        async move {
            tracing::debug!("Dispatching remote call");
            let outcome = transport_call.await;
            drop(in_flight);

            if !lifecycle.tokens.is_current(&scope, token) {
                tracing::debug!("Discarding stale response");
                return RemoteCallResult::failure(
                    ErrorKind::Superseded,
                    format!("Response to {} superseded by a newer request", action),
                    None,
                );
            }

            lifecycle.settle(&action, outcome, decode, describe, &flags)
        }
        .instrument(span)
    }
}
