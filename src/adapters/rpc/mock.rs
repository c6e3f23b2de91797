//! Mock RPC transport for testing.
//!
//! Responses are scripted per method. Several scripted answers for one
//! method are returned in order, and the last one keeps being returned.
//! Methods without a script answer with an empty object. A method can be
//! given a delay to simulate a slow endpoint.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockRpcTransport::new()
//!     .with_response("createConference", json!({"result": {"name": "DevCon"}}))
//!     .with_delay("createConference", Duration::from_millis(200))
//!     .with_error("getProfile", TransportError::connection("offline"));
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;

use crate::domain::remote_call::RawResponse;
use crate::ports::{RpcTransport, TransportError};

/// A call the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

type Scripted = Result<RawResponse, TransportError>;

#[derive(Debug, Default)]
pub struct MockRpcTransport {
    scripts: RwLock<HashMap<String, VecDeque<Scripted>>>,
    delays: RwLock<HashMap<String, Duration>>,
    calls: RwLock<Vec<RecordedCall>>,
}

impl MockRpcTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a response for `method`.
    pub fn with_response(self, method: impl Into<String>, response: Value) -> Self {
        self.respond(method, response);
        self
    }

    /// Scripts a transport failure for `method`.
    pub fn with_error(self, method: impl Into<String>, error: TransportError) -> Self {
        self.fail(method, error);
        self
    }

    /// Makes every call to `method` take `delay` before answering.
    pub fn with_delay(self, method: impl Into<String>, delay: Duration) -> Self {
        self.delay(method, delay);
        self
    }

    /// Scripts a response for `method` at runtime.
    pub fn respond(&self, method: impl Into<String>, response: Value) {
        self.push(method.into(), Ok(RawResponse::new(response)));
    }

    /// Scripts a transport failure for `method` at runtime.
    pub fn fail(&self, method: impl Into<String>, error: TransportError) {
        self.push(method.into(), Err(error));
    }

    /// Sets the delay for `method` at runtime.
    pub fn delay(&self, method: impl Into<String>, delay: Duration) {
        write(&self.delays).insert(method.into(), delay);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        read(&self.calls).clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        read(&self.calls)
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Parameters of the most recent call to `method`.
    pub fn last_params(&self, method: &str) -> Option<Value> {
        read(&self.calls)
            .iter()
            .rev()
            .find(|call| call.method == method)
            .map(|call| call.params.clone())
    }

    fn push(&self, method: String, scripted: Scripted) {
        write(&self.scripts)
            .entry(method)
            .or_default()
            .push_back(scripted);
    }

    fn next(&self, method: &str) -> Scripted {
        let mut scripts = write(&self.scripts);
        let scripted = match scripts.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        scripted.unwrap_or_else(|| Ok(RawResponse::empty()))
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RpcTransport for MockRpcTransport {
    async fn execute(&self, method: &str, params: Value) -> Result<RawResponse, TransportError> {
        write(&self.calls).push(RecordedCall {
            method: method.to_string(),
            params,
        });

        let delay = read(&self.delays).get(method).copied();
        if let Some(delay) = delay {
            sleep(delay).await;
        }

        self.next(method)
    }
}
