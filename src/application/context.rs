//! AppContext - the one place the client's shared state lives.
//!
//! Built once at startup from configuration and the injected adapters. Every
//! service handed out shares the same status line, auth session and request
//! tokens.

use std::sync::Arc;

use crate::application::services::{
    ConferenceService, ProfileService, RegistrationService, SessionService, SpeakerService,
    WishlistService,
};
use crate::application::{AuthSession, RemoteCallLifecycle, StatusTracker, UnauthorizedHandler};
use crate::config::AppConfig;
use crate::ports::{IdentityProvider, LoginPrompt, RpcTransport};

#[derive(Clone)]
pub struct AppContext {
    status: StatusTracker,
    session: AuthSession,
    lifecycle: RemoteCallLifecycle,
    transport: Arc<dyn RpcTransport>,
}

impl AppContext {
    pub fn new(
        config: &AppConfig,
        transport: Arc<dyn RpcTransport>,
        identity: Arc<dyn IdentityProvider>,
        prompt: Arc<dyn LoginPrompt>,
    ) -> Self {
        let status = StatusTracker::new(&config.status);
        let session = AuthSession::new(identity, prompt, status.clone(), &config.auth);
        let lifecycle =
            RemoteCallLifecycle::new(status.clone(), UnauthorizedHandler::new(session.clone()));

        Self {
            status,
            session,
            lifecycle,
            transport,
        }
    }

    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn lifecycle(&self) -> &RemoteCallLifecycle {
        &self.lifecycle
    }

    pub fn conferences(&self) -> ConferenceService {
        ConferenceService::new(self.lifecycle.clone(), Arc::clone(&self.transport))
    }

    pub fn registrations(&self) -> RegistrationService {
        RegistrationService::new(self.lifecycle.clone(), Arc::clone(&self.transport))
    }

    pub fn profile(&self) -> ProfileService {
        ProfileService::new(
            self.lifecycle.clone(),
            Arc::clone(&self.transport),
            self.session.clone(),
        )
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.lifecycle.clone(), Arc::clone(&self.transport))
    }

    pub fn wishlist(&self) -> WishlistService {
        WishlistService::new(self.lifecycle.clone(), Arc::clone(&self.transport))
    }

    pub fn speakers(&self) -> SpeakerService {
        SpeakerService::new(self.lifecycle.clone(), Arc::clone(&self.transport))
    }

    /// Signs out and clears whatever the status line was showing.
    pub async fn sign_out(&self) {
        self.session.sign_out().await;
        self.status.clear();
    }
}
