//! Mock identity provider for testing.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockIdentityProvider::new().with_user_info(UserInfo {
//!     email: Some("a@b.com".to_string()),
//!     ..UserInfo::default()
//! });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::auth::AuthError;
use crate::ports::{AccessToken, IdentityProvider, SignInSettings, UserInfo};

/// Token handed out by a successful mock sign-in.
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

/// Mock identity provider.
///
/// Sign-in always succeeds unless an error is forced, and stores
/// [`MOCK_ACCESS_TOKEN`]. User info is whatever was configured.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    user_info: RwLock<Option<UserInfo>>,
    token: RwLock<Option<AccessToken>>,
    /// Optional error to return from every call (for error testing)
    force_error: RwLock<Option<AuthError>>,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets what `user_info` reports after sign-in.
    pub fn with_user_info(self, info: UserInfo) -> Self {
        *write(&self.user_info) = Some(info);
        self
    }

    /// Starts out already holding a token.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        *write(&self.token) = Some(AccessToken::new(token));
        self
    }

    /// Forces all calls to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        self.set_error(error);
        self
    }

    pub fn set_error(&self, error: AuthError) {
        *write(&self.force_error) = Some(error);
    }

    pub fn clear_error(&self) {
        *write(&self.force_error) = None;
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    fn check_error(&self) -> Result<(), AuthError> {
        match read(&self.force_error).clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, _settings: &SignInSettings) -> Result<(), AuthError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.check_error()?;
        *write(&self.token) = Some(AccessToken::new(MOCK_ACCESS_TOKEN));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.check_error()
    }

    fn token(&self) -> Option<AccessToken> {
        read(&self.token).clone()
    }

    fn clear_token(&self) {
        *write(&self.token) = None;
    }

    async fn user_info(&self) -> Result<UserInfo, AuthError> {
        self.check_error()?;
        if read(&self.token).is_none() {
            return Err(AuthError::NotSignedIn);
        }
        Ok(read(&self.user_info).clone().unwrap_or_default())
    }
}
