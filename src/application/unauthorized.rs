//! UnauthorizedHandler - turns an unauthorized response into a login challenge.

use crate::application::{AuthSession, LoginChallenge};
use crate::domain::remote_call::UNAUTHORIZED_CODE;

/// Inspects response error codes and challenges login on the sentinel code.
#[derive(Debug, Clone)]
pub struct UnauthorizedHandler {
    session: AuthSession,
    sentinel: i64,
}

impl UnauthorizedHandler {
    pub fn new(session: AuthSession) -> Self {
        Self {
            session,
            sentinel: UNAUTHORIZED_CODE,
        }
    }

    /// Returns true, and challenges login, iff `code` is the unauthorized
    /// code. Any other code, or none, has no side effect.
    pub fn check(&self, code: Option<i64>) -> bool {
        if code != Some(self.sentinel) {
            return false;
        }

        match self.session.challenge_login() {
            LoginChallenge::Opened(_) => tracing::info!("Unauthorized response, login requested"),
            LoginChallenge::AlreadyPending => {
                tracing::debug!("Unauthorized response, login already requested")
            }
            LoginChallenge::Unavailable => {
                tracing::warn!("Unauthorized response, login prompt unavailable")
            }
        }
        true
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }
}
