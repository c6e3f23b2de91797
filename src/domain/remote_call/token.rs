//! Monotonic request tokens used to discard stale responses.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Identifies one remote call. Later calls always get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tokens and remembers the newest one per scope.
///
/// A scope names the piece of UI state a call feeds (a list, a detail
/// view). Only the newest call in a scope is current.
#[derive(Debug, Default)]
pub struct RequestTokens {
    next: AtomicU64,
    current: Mutex<HashMap<String, RequestToken>>,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token and makes it current for `scope`.
    pub fn issue(&self, scope: &str) -> RequestToken {
        let token = RequestToken(self.next.fetch_add(1, Ordering::Relaxed) + 1);
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(scope.to_string(), token);
        token
    }

    /// Returns true if `token` is still the newest one issued for `scope`.
    pub fn is_current(&self, scope: &str, token: RequestToken) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(scope)
            .is_some_and(|current| *current == token)
    }
}
