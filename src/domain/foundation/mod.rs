//! Foundation module - Shared domain primitives.
//!
//! Value objects and error types used across the client domain.

mod errors;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
