//! Auth session lifecycle states.

use std::fmt;

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Where the auth session currently is in the sign-in protocol.
///
/// ```text
/// SignedOut --challenge/sign_in--> Authenticating --identity--> SignedIn
/// Authenticating --failed/dismissed--> SignedOut
/// SignedIn --sign_out--> SignedOut
/// SignedIn --401 challenge--> Authenticating
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    SignedOut,
    Authenticating,
    SignedIn,
}

impl AuthState {
    /// Returns true when an identity is established.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn)
    }
}

impl StateMachine for AuthState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AuthState::*;
        matches!(
            (self, target),
            (SignedOut, Authenticating)
                | (Authenticating, SignedIn)
                | (Authenticating, SignedOut)
                | (SignedIn, SignedOut)
                | (SignedIn, Authenticating)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AuthState::*;
        match self {
            SignedOut => vec![Authenticating],
            Authenticating => vec![SignedIn, SignedOut],
            SignedIn => vec![SignedOut, Authenticating],
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthState::SignedOut => "signed_out",
            AuthState::Authenticating => "authenticating",
            AuthState::SignedIn => "signed_in",
        };
        write!(f, "{}", s)
    }
}
