//! Identity provider adapters.
//!
//! - `OAuth2IdentityProvider` - userinfo and revocation over HTTP
//! - `MockIdentityProvider` - in-memory provider for tests

mod mock;
mod oauth2;

pub use mock::{MockIdentityProvider, MOCK_ACCESS_TOKEN};
pub use oauth2::{OAuth2Config, OAuth2IdentityProvider};
