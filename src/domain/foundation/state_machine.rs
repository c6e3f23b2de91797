//! State machine trait for status enums.
//!
//! Gives lifecycle enums (such as the auth session state) one way to
//! declare their legal transitions and apply them with validation.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list the valid transitions; validated transitions and
/// terminal-state detection come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for AuthState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (SignedOut, Authenticating) | (Authenticating, SignedIn))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             SignedOut => vec![Authenticating],
///             Authenticating => vec![SignedIn, SignedOut],
///             SignedIn => vec![SignedOut],
///         }
///     }
/// }
///
/// let next = AuthState::SignedOut.transition_to(AuthState::Authenticating)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(self, target))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
