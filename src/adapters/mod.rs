//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client core to external systems:
//! - `rpc` - RPC transports (HTTP JSON-RPC, mock)
//! - `identity` - Identity providers (OAuth2, mock)
//! - `prompt` - Login prompts (direct, mock)

pub mod identity;
pub mod prompt;
pub mod rpc;

pub use identity::{MockIdentityProvider, OAuth2Config, OAuth2IdentityProvider};
pub use prompt::{DirectSignInPrompt, MockLoginPrompt};
pub use rpc::{HttpRpcClient, HttpRpcConfig, MockRpcTransport};
