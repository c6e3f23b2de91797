//! Mock login prompt for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::ports::{LoginPrompt, PromptOutcome, SignInHandle};

/// What the mock user does with the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptBehavior {
    /// Signs in; a failed sign-in dismisses the prompt.
    Complete,
    /// Closes the prompt without signing in.
    Dismiss,
    /// Walks away; the prompt never resolves.
    Abandon,
}

#[derive(Debug)]
pub struct MockLoginPrompt {
    behavior: PromptBehavior,
    opened: AtomicUsize,
}

impl MockLoginPrompt {
    pub fn new(behavior: PromptBehavior) -> Self {
        Self {
            behavior,
            opened: AtomicUsize::new(0),
        }
    }

    pub fn completing() -> Self {
        Self::new(PromptBehavior::Complete)
    }

    pub fn dismissing() -> Self {
        Self::new(PromptBehavior::Dismiss)
    }

    pub fn abandoning() -> Self {
        Self::new(PromptBehavior::Abandon)
    }

    /// How many times the prompt has been opened.
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoginPrompt for MockLoginPrompt {
    async fn open(&self, sign_in: Arc<dyn SignInHandle>) -> PromptOutcome {
        self.opened.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            PromptBehavior::Complete => match sign_in.sign_in().await {
                Ok(identity) => PromptOutcome::Completed(identity),
                Err(_) => PromptOutcome::Dismissed,
            },
            PromptBehavior::Dismiss => PromptOutcome::Dismissed,
            PromptBehavior::Abandon => futures::future::pending().await,
        }
    }
}
