//! Login prompt port.
//!
//! The dialog host that shows a sign-in prompt when a call comes back
//! unauthorized. The prompt drives sign-in through a `SignInHandle`, so it
//! never needs to know about the session type behind it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::{AuthError, UserIdentity};

/// How a login prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user signed in.
    Completed(UserIdentity),
    /// The user closed the prompt, or it timed out.
    Dismissed,
}

/// Something that can perform sign-in on behalf of a prompt.
#[async_trait]
pub trait SignInHandle: Send + Sync {
    async fn sign_in(&self) -> Result<UserIdentity, AuthError>;
}

/// Modal sign-in dialog.
///
/// `open` resolves when the user finishes with the prompt. An abandoned
/// prompt may never resolve; callers that need a bound apply a timeout.
#[async_trait]
pub trait LoginPrompt: Send + Sync {
    async fn open(&self, sign_in: Arc<dyn SignInHandle>) -> PromptOutcome;
}
