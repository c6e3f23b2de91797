//! Signed-in user identity and authentication errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Identity of the signed-in user, as reported by the provider's user-info call.
///
/// Only the claims the client actually displays are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// The user's email address. Always present; sign-in fails without it.
    pub email: String,

    /// Display name if the provider returned one.
    pub display_name: Option<String>,

    /// Whether the provider has verified the email address.
    pub email_verified: bool,
}

impl UserIdentity {
    /// Creates a new identity, rejecting an empty email.
    pub fn new(
        email: impl Into<String>,
        display_name: Option<String>,
        email_verified: bool,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        Ok(Self {
            email,
            display_name,
            email_verified,
        })
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Authentication errors raised by the session and identity adapters.
///
/// These errors are **domain-centric**: they describe what went wrong from
/// the client's perspective, not the provider's wire details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No access token is available for the requested operation.
    #[error("Not signed in")]
    NotSignedIn,

    /// The provider rejected the access token.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The user-info call succeeded but carried no email address.
    #[error("Unable to retrieve user email")]
    MissingEmail,

    /// The user closed the sign-in flow without completing it.
    #[error("Sign-in cancelled")]
    SignInCancelled,

    /// The identity provider is unreachable or answered unexpectedly.
    #[error("Identity provider unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::NotSignedIn | AuthError::InvalidToken)
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
