//! AuthSession - process-wide sign-in state and login orchestration.
//!
//! The session is the only writer of [`AuthState`]. Sign-in goes through the
//! identity provider and then fetches user info; a login challenge opens the
//! login prompt in a background task and is never issued twice while one is
//! pending.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::application::StatusTracker;
use crate::config::AuthConfig;
use crate::domain::auth::{AuthError, AuthState, UserIdentity};
use crate::domain::foundation::StateMachine;
use crate::ports::{
    AccessToken, IdentityProvider, LoginPrompt, PromptOutcome, SignInHandle, SignInSettings,
};

/// Action named in the status message when sign-in fails.
const LOGIN_ACTION: &str = "login";

/// Result of [`AuthSession::challenge_login`].
#[derive(Debug)]
pub enum LoginChallenge {
    /// A prompt was opened; the handle resolves with its outcome.
    Opened(JoinHandle<PromptOutcome>),
    /// A sign-in is already in progress; no second prompt was opened.
    AlreadyPending,
    /// No async runtime is available to host the prompt.
    Unavailable,
}

impl LoginChallenge {
    pub fn was_opened(&self) -> bool {
        matches!(self, LoginChallenge::Opened(_))
    }

    /// Waits for the prompt to finish. `None` when no prompt was opened.
    pub async fn outcome(self) -> Option<PromptOutcome> {
        match self {
            LoginChallenge::Opened(handle) => handle.await.ok(),
            LoginChallenge::AlreadyPending | LoginChallenge::Unavailable => None,
        }
    }
}

/// Shared handle to the signed-in state. Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    provider: Arc<dyn IdentityProvider>,
    prompt: Arc<dyn LoginPrompt>,
    status: StatusTracker,
    settings: SignInSettings,
    login_timeout: Option<Duration>,
    state: Mutex<SessionState>,
    /// Woken whenever a sign-in attempt settles.
    settled: Notify,
}

#[derive(Debug, Default)]
struct SessionState {
    auth: AuthState,
    identity: Option<UserIdentity>,
}

impl SessionState {
    /// Applies a transition. Staying in the same state is a no-op.
    fn move_to(&mut self, target: AuthState) -> bool {
        if self.auth == target {
            return true;
        }
        match self.auth.transition_to(target) {
            Ok(next) => {
                tracing::debug!(from = %self.auth, to = %next, "Auth state changed");
                self.auth = next;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring auth state transition");
                false
            }
        }
    }

    fn sign_out(&mut self) {
        self.move_to(AuthState::SignedOut);
        self.identity = None;
    }
}

impl AuthSession {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        prompt: Arc<dyn LoginPrompt>,
        status: StatusTracker,
        config: &AuthConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                provider,
                prompt,
                status,
                settings: config.sign_in_settings(),
                login_timeout: config.login_timeout(),
                state: Mutex::new(SessionState::default()),
                settled: Notify::new(),
            }),
        }
    }

    pub fn state(&self) -> AuthState {
        self.lock().auth
    }

    pub fn is_signed_in(&self) -> bool {
        self.state().is_signed_in()
    }

    pub fn identity(&self) -> Option<UserIdentity> {
        self.lock().identity.clone()
    }

    /// The provider's current access token.
    pub fn token(&self) -> Option<AccessToken> {
        self.inner.provider.token()
    }

    /// Signs in through the identity provider and fetches the user's email.
    ///
    /// On success the session is `SignedIn` and the status reads
    /// `"Logged in with {email}"`. On failure the session is `SignedOut` and
    /// the status reports the failed login.
    pub async fn sign_in(&self) -> Result<UserIdentity, AuthError> {
        self.lock().move_to(AuthState::Authenticating);

        let result = self.finish_sign_in().await;
        self.inner.settled.notify_waiters();
        result
    }

    async fn finish_sign_in(&self) -> Result<UserIdentity, AuthError> {
        match self.authenticate().await {
            Ok(identity) => {
                {
                    let mut state = self.lock();
                    if !state.move_to(AuthState::SignedIn) {
                        // Signed out while the provider was still answering.
                        return Err(AuthError::SignInCancelled);
                    }
                    state.identity = Some(identity.clone());
                }
                tracing::info!(email = %identity.email, "User signed in");
                self.inner
                    .status
                    .report_success(format!("Logged in with {}", identity.email));
                Ok(identity)
            }
            Err(err) => {
                self.lock().sign_out();
                tracing::warn!(error = %err, "Sign-in failed");
                self.inner
                    .status
                    .report_error(LOGIN_ACTION, Some(&err.to_string()));
                Err(err)
            }
        }
    }

    /// Like [`sign_in`](Self::sign_in), invoking `on_complete` after a
    /// successful sign-in.
    pub async fn sign_in_then<F>(&self, on_complete: F) -> Result<UserIdentity, AuthError>
    where
        F: FnOnce(&UserIdentity) + Send,
    {
        let identity = self.sign_in().await?;
        on_complete(&identity);
        Ok(identity)
    }

    /// Signs out at the provider and forgets the local token and identity.
    ///
    /// A provider failure is logged; local state is cleared regardless.
    pub async fn sign_out(&self) {
        if let Err(err) = self.inner.provider.sign_out().await {
            tracing::warn!(error = %err, "Provider sign-out failed");
        }
        self.inner.provider.clear_token();
        self.lock().sign_out();
        self.inner.settled.notify_waiters();
        tracing::info!("User signed out");
    }

    /// Opens the login prompt unless a sign-in is already in progress.
    ///
    /// The prompt runs in a background task. A dismissed (or timed out)
    /// prompt returns the session to `SignedOut`.
    pub fn challenge_login(&self) -> LoginChallenge {
        let handle = {
            let mut state = self.lock();
            if state.auth == AuthState::Authenticating {
                tracing::debug!("Login challenge already pending");
                return LoginChallenge::AlreadyPending;
            }
            let handle = match Handle::try_current() {
                Ok(handle) => handle,
                Err(_) => {
                    tracing::warn!("No async runtime available, cannot open login prompt");
                    return LoginChallenge::Unavailable;
                }
            };
            state.move_to(AuthState::Authenticating);
            handle
        };

        tracing::info!("Opening login prompt");
        let session = self.clone();
        LoginChallenge::Opened(handle.spawn(async move { session.run_prompt().await }))
    }

    /// Waits for a sign-in in progress to settle.
    ///
    /// Returns the identity when the session ends up signed in and `None`
    /// when it ends up signed out. Returns at once if nothing is pending.
    pub async fn wait_for_sign_in(&self) -> Option<UserIdentity> {
        loop {
            let settled = self.inner.settled.notified();
            tokio::pin!(settled);
            settled.as_mut().enable();

            {
                let state = self.lock();
                if state.auth != AuthState::Authenticating {
                    return state.identity.clone();
                }
            }

            settled.await;
        }
    }

    async fn run_prompt(self) -> PromptOutcome {
        let prompt = Arc::clone(&self.inner.prompt);
        let sign_in: Arc<dyn SignInHandle> = Arc::new(self.clone());

        let outcome = match self.inner.login_timeout {
            Some(limit) => match tokio::time::timeout(limit, prompt.open(sign_in)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::info!(timeout_secs = limit.as_secs(), "Login prompt timed out");
                    PromptOutcome::Dismissed
                }
            },
            None => prompt.open(sign_in).await,
        };

        if outcome == PromptOutcome::Dismissed {
            let mut state = self.lock();
            if state.auth == AuthState::Authenticating {
                state.sign_out();
            }
            drop(state);
            self.inner.settled.notify_waiters();
            tracing::info!("Login prompt dismissed");
        }
        outcome
    }

    async fn authenticate(&self) -> Result<UserIdentity, AuthError> {
        let provider = &self.inner.provider;
        provider.sign_in(&self.inner.settings).await?;

        let info = provider.user_info().await?;
        let email = info
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(AuthError::MissingEmail)?;

        UserIdentity::new(email, info.name, info.verified_email.unwrap_or(false))
            .map_err(|_| AuthError::MissingEmail)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SignInHandle for AuthSession {
    async fn sign_in(&self) -> Result<UserIdentity, AuthError> {
        AuthSession::sign_in(self).await
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("AuthSession")
            .field("state", &state.auth)
            .field("identity", &state.identity)
            .finish()
    }
}
