//! Login prompt adapters.
//!
//! - `DirectSignInPrompt` - non-interactive, signs in straight away
//! - `MockLoginPrompt` - scripted prompt for tests

mod direct;
mod mock;

pub use direct::DirectSignInPrompt;
pub use mock::{MockLoginPrompt, PromptBehavior};
