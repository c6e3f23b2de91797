//! Outcome of one remote call.

use std::fmt;

use thiserror::Error;

/// Why a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API rejected the credential; a login challenge was raised.
    Unauthorized,
    /// The API reported a business error.
    Remote,
    /// The request never produced a response.
    Transport,
    /// The response did not have the expected shape.
    Malformed,
    /// A newer call in the same scope was issued before this one settled.
    Superseded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Remote => "REMOTE",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::Malformed => "MALFORMED",
            ErrorKind::Superseded => "SUPERSEDED",
        };
        write!(f, "{}", s)
    }
}

/// Result of a remote call, produced once and consumed by its caller.
///
/// `message` is the status text that was shown for the outcome (or, for
/// `Superseded`, the reason it was not shown).
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCallResult<T> {
    Success {
        data: T,
        message: String,
    },
    Failure {
        kind: ErrorKind,
        message: String,
        raw_code: Option<i64>,
    },
}

impl<T> RemoteCallResult<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: message.into(),
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>, raw_code: Option<i64>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
            raw_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure kind, or `None` on success.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message, .. } => message,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Maps the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteCallResult<U> {
        match self {
            Self::Success { data, message } => RemoteCallResult::Success {
                data: f(data),
                message,
            },
            Self::Failure {
                kind,
                message,
                raw_code,
            } => RemoteCallResult::Failure {
                kind,
                message,
                raw_code,
            },
        }
    }

    /// Converts into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<T, RemoteCallError> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure {
                kind,
                message,
                raw_code,
            } => Err(RemoteCallError {
                kind,
                message,
                raw_code,
            }),
        }
    }
}

/// A failed remote call in `Result` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{kind}] {message}")]
pub struct RemoteCallError {
    pub kind: ErrorKind,
    pub message: String,
    pub raw_code: Option<i64>,
}

impl RemoteCallError {
    /// Returns true if the user has to sign in before retrying.
    pub fn requires_reauthentication(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Returns true if retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport | ErrorKind::Superseded)
    }
}
