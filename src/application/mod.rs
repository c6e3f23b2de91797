//! Application layer - the remote call lifecycle and the services built on it.
//!
//! - `StatusTracker` - transient status line with debounced auto-clear
//! - `UnauthorizedHandler` - challenges login on unauthorized responses
//! - `RemoteCallLifecycle` - dispatch, classify and report one remote call
//! - `AuthSession` - signed-in state and login orchestration
//! - `services` - typed feature services over the API
//! - `AppContext` - owns all of the above for one running client

mod auth_session;
mod context;
pub mod decode;
mod lifecycle;
pub mod services;
mod status_tracker;
mod unauthorized;

pub use auth_session::{AuthSession, LoginChallenge};
pub use context::AppContext;
pub use lifecycle::{RemoteCall, RemoteCallLifecycle, UNAUTHORIZED_MESSAGE};
pub use status_tracker::{action_or_default, StatusTracker, DEFAULT_ACTION};
pub use unauthorized::UnauthorizedHandler;
