//! ProfileService - load and save the signed-in user's profile.
//!
//! Keeps a [`ProfileDraft`] that the profile view edits; loading replaces
//! it and a successful save commits it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{encode, no_params, RpcEndpoint};
use crate::application::{
    decode, AuthSession, LoginChallenge, RemoteCallLifecycle, UNAUTHORIZED_MESSAGE,
};
use crate::domain::conference::{Profile, ProfileDraft};
use crate::domain::remote_call::{ErrorKind, PendingFlags, RemoteCallResult};
use crate::ports::{PromptOutcome, RpcTransport};

#[derive(Clone)]
pub struct ProfileService {
    endpoint: RpcEndpoint,
    session: AuthSession,
    draft: Arc<Mutex<ProfileDraft>>,
}

impl ProfileService {
    pub fn new(
        lifecycle: RemoteCallLifecycle,
        transport: Arc<dyn RpcTransport>,
        session: AuthSession,
    ) -> Self {
        Self {
            endpoint: RpcEndpoint::new(lifecycle, transport),
            session,
            draft: Arc::new(Mutex::new(ProfileDraft::default())),
        }
    }

    pub fn flags(&self) -> Arc<PendingFlags> {
        Arc::clone(&self.endpoint.flags)
    }

    /// Snapshot of the draft.
    pub fn draft(&self) -> ProfileDraft {
        self.lock_draft().clone()
    }

    /// Edits the draft in place.
    pub fn edit<R>(&self, f: impl FnOnce(&mut ProfileDraft) -> R) -> R {
        f(&mut self.lock_draft())
    }

    /// Fetches the profile and replaces the draft with it.
    pub async fn get_profile(&self) -> RemoteCallResult<Profile> {
        let result = self
            .endpoint
            .call("get a user profile")
            .decode_with(decode::result_body::<Profile>)
            .on_success(|_| "Retrieved profile".to_string())
            .send(self.endpoint.execute("getProfile", no_params()))
            .await;

        if let Some(profile) = result.data() {
            self.lock_draft().set(profile.clone());
        }
        result
    }

    /// Saves the draft's display name and tee-shirt size.
    pub async fn save_profile(&self) -> RemoteCallResult<()> {
        let form = self.lock_draft().to_form();

        let result = self
            .endpoint
            .call("update a profile")
            .decode_with(decode::unit)
            .on_success(|_| "The profile has been updated".to_string())
            .send(self.endpoint.execute("saveProfile", encode(&form)))
            .await;

        if result.is_success() {
            self.lock_draft().commit();
        }
        result
    }

    /// Loads the profile for the profile page.
    ///
    /// When signed out, asks the user to log in first and only loads once
    /// the prompt completes. A prompt that is already open is waited on
    /// rather than opened again.
    pub async fn load_after_sign_in(&self) -> RemoteCallResult<Profile> {
        if !self.session.is_signed_in() {
            let signed_in = match self.session.challenge_login() {
                challenge @ LoginChallenge::Opened(_) => matches!(
                    challenge.outcome().await,
                    Some(PromptOutcome::Completed(_))
                ),
                LoginChallenge::AlreadyPending => self.session.wait_for_sign_in().await.is_some(),
                LoginChallenge::Unavailable => false,
            };
            if !signed_in {
                return RemoteCallResult::failure(
                    ErrorKind::Unauthorized,
                    UNAUTHORIZED_MESSAGE,
                    None,
                );
            }
        }

        self.lock_draft().clear();
        self.get_profile().await
    }

    fn lock_draft(&self) -> MutexGuard<'_, ProfileDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
