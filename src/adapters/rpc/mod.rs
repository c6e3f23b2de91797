//! RPC transport adapters.
//!
//! - `HttpRpcClient` - JSON-RPC over HTTP with a bearer token
//! - `MockRpcTransport` - scripted responses for tests

mod http;
mod mock;

pub use http::{HttpRpcClient, HttpRpcConfig};
pub use mock::{MockRpcTransport, RecordedCall};
