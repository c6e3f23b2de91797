//! Domain layer containing the client's vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (timestamps, validation errors, state machines)
//! - `auth` - Signed-in identity and auth session states
//! - `status` - User-visible transient status
//! - `remote_call` - Raw responses, call outcomes, pending flags and request tokens
//! - `conference` - Conference, session, speaker and profile records

pub mod auth;
pub mod conference;
pub mod foundation;
pub mod remote_call;
pub mod status;
