//! RPC transport port.
//!
//! Wraps the externally defined API client. The core never looks at the wire:
//! it hands over a method name and JSON parameters and gets back whatever the
//! API answered as a `RawResponse`.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `Ok(RawResponse)` whenever the API answered, **including** API
//!   errors, which stay inside the response's `error` member
//! - Return `Err(TransportError)` only when no answer was obtained or the
//!   body could not be read as JSON

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::remote_call::{ErrorKind, RawResponse};

/// Executes API methods.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Executes `method` (e.g. `"queryConferences"`) with `params`.
    async fn execute(&self, method: &str, params: Value) -> Result<RawResponse, TransportError>;
}

/// The transport could not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// How the lifecycle classifies this error.
    ///
    /// Encoding and decoding problems are shape problems, not connectivity.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Connection(_) | TransportError::Timeout { .. } => ErrorKind::Transport,
            TransportError::Encode(_) | TransportError::Decode(_) => ErrorKind::Malformed,
        }
    }
}
