//! StatusTracker - the single transient status line shown to the user.
//!
//! Every report replaces the current status (last write wins) and schedules an
//! auto-clear. Scheduling is debounced: a newer report cancels the pending
//! clear of the previous one, so only the latest timer ever fires.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::StatusConfig;
use crate::domain::foundation::Timestamp;
use crate::domain::status::{StatusLevel, StatusState};

/// Action used in messages when a caller supplies an empty description.
pub const DEFAULT_ACTION: &str = "complete the request";

/// Returns `action`, or [`DEFAULT_ACTION`] when it is blank.
pub fn action_or_default(action: &str) -> &str {
    if action.trim().is_empty() {
        DEFAULT_ACTION
    } else {
        action
    }
}

/// Shared handle to the status line. Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct StatusTracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    default_delay: Duration,
    state: Mutex<TrackerState>,
    clears_fired: AtomicUsize,
}

#[derive(Default)]
struct TrackerState {
    status: StatusState,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl StatusTracker {
    pub fn new(config: &StatusConfig) -> Self {
        Self::with_delay(config.clear_after())
    }

    /// Creates a tracker that clears messages after `delay`.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                default_delay: delay,
                state: Mutex::new(TrackerState::default()),
                clears_fired: AtomicUsize::new(0),
            }),
        }
    }

    /// Snapshot of the current status.
    pub fn current(&self) -> StatusState {
        self.inner.lock().status.clone()
    }

    /// Default auto-clear delay.
    pub fn default_delay(&self) -> Duration {
        self.inner.default_delay
    }

    /// Number of auto-clears that have fired so far.
    pub fn clears_fired(&self) -> usize {
        self.inner.clears_fired.load(Ordering::Acquire)
    }

    /// Shows `message` as a success and returns it.
    pub fn report_success(&self, message: impl Into<String>) -> String {
        let message = message.into();
        tracing::info!(status = %StatusLevel::Success, "{}", message);
        self.show(StatusLevel::Success, message)
    }

    /// Shows a warning for a failed `action` and returns the message.
    ///
    /// The message always names the action; the remote error text, when
    /// there is one, is appended after a colon.
    pub fn report_error(&self, action: &str, error_message: Option<&str>) -> String {
        let action = action_or_default(action);
        let message = match error_message.map(str::trim) {
            Some(detail) if !detail.is_empty() => format!("Failed to {}: {}", action, detail),
            _ => format!("Failed to {}", action),
        };
        tracing::error!(status = %StatusLevel::Warning, action = %action, "{}", message);
        self.show(StatusLevel::Warning, message)
    }

    /// Shows an informational message and returns it.
    pub fn report_info(&self, message: impl Into<String>) -> String {
        let message = message.into();
        tracing::info!(status = %StatusLevel::Info, "{}", message);
        self.show(StatusLevel::Info, message)
    }

    /// Cancels any pending clear and schedules a new one after `delay`
    /// (the configured default when `None`).
    ///
    /// Outside a tokio runtime nothing is scheduled and the status stays
    /// until the next report or an explicit [`clear`](Self::clear).
    pub fn clear_after(&self, delay: Option<Duration>) {
        let delay = delay.unwrap_or(self.inner.default_delay);
        let mut state = self.inner.lock();

        state.generation += 1;
        if let Some(previous) = state.pending.take() {
            previous.abort();
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime available, status will not auto-clear");
                state.status.expires_at = None;
                return;
            }
        };

        state.status.expires_at = Some(Timestamp::now().plus(delay));

        let generation = state.generation;
        let tracker: Weak<TrackerInner> = Arc::downgrade(&self.inner);
        state.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = tracker.upgrade() {
                inner.expire(generation);
            }
        }));
    }

    /// Resets the status immediately and cancels any pending clear.
    pub fn clear(&self) {
        let mut state = self.inner.lock();
        state.generation += 1;
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        state.status = StatusState::cleared();
    }

    fn show(&self, level: StatusLevel, message: String) -> String {
        {
            let mut state = self.inner.lock();
            state.status = StatusState {
                level,
                message: message.clone(),
                expires_at: None,
            };
        }
        self.clear_after(None);
        message
    }
}

impl TrackerInner {
    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expire(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation != generation {
            return;
        }
        state.status = StatusState::cleared();
        state.pending = None;
        self.clears_fired.fetch_add(1, Ordering::AcqRel);
        tracing::debug!("Status cleared");
    }
}

impl std::fmt::Debug for StatusTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusTracker")
            .field("status", &self.current())
            .field("default_delay", &self.inner.default_delay)
            .finish()
    }
}
