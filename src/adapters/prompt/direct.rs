//! Non-interactive login prompt.
//!
//! Runs the sign-in as soon as the prompt opens. Suits command-line use
//! where the identity provider already holds a token.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ports::{LoginPrompt, PromptOutcome, SignInHandle};

#[derive(Debug, Default, Clone, Copy)]
pub struct DirectSignInPrompt;

impl DirectSignInPrompt {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LoginPrompt for DirectSignInPrompt {
    async fn open(&self, sign_in: Arc<dyn SignInHandle>) -> PromptOutcome {
        match sign_in.sign_in().await {
            Ok(identity) => PromptOutcome::Completed(identity),
            Err(err) => {
                tracing::warn!(error = %err, "Sign-in from login prompt failed");
                PromptOutcome::Dismissed
            }
        }
    }
}
