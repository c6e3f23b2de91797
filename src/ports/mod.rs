//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! client core and the outside world. Adapters implement these ports.
//!
//! - `RpcTransport` - Executes one API method and returns the raw response
//! - `IdentityProvider` - OAuth2 sign-in, sign-out, token and user info
//! - `LoginPrompt` - Interactive sign-in dialog opened on a login challenge

mod identity_provider;
mod login_prompt;
mod rpc_transport;

pub use identity_provider::{AccessToken, IdentityProvider, SignInSettings, UserInfo};
pub use login_prompt::{LoginPrompt, PromptOutcome, SignInHandle};
pub use rpc_transport::{RpcTransport, TransportError};
