//! Remote call vocabulary - responses, outcomes, per-call flags and tokens.
//!
//! The lifecycle that drives these types lives in
//! `application::lifecycle`; everything here is plain data.

mod pending;
mod raw_response;
mod result;
mod token;

pub use pending::{PendingFlags, PendingSnapshot};
pub use raw_response::{MalformedResponse, RawResponse, RemoteErrorPayload};
pub use result::{ErrorKind, RemoteCallError, RemoteCallResult};
pub use token::{RequestToken, RequestTokens};

/// Error code the API uses for a missing or expired credential.
pub const UNAUTHORIZED_CODE: i64 = 401;
