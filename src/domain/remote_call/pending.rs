//! Per-call loading/submitted flags.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Loading and submitted flags for one call (or one view's calls).
///
/// `loading` is true while any call sharing the flags is outstanding.
/// `submitted` is raised with it and only lowered by a successful outcome
/// once no other call is in flight, so a view can keep its form locked
/// after a failed submission.
#[derive(Debug, Default)]
pub struct PendingFlags {
    in_flight: AtomicUsize,
    submitted: AtomicBool,
}

/// Point-in-time copy of `PendingFlags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingSnapshot {
    pub loading: bool,
    pub submitted: bool,
}

impl PendingFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    /// Number of calls dispatched with these flags that have not settled.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> PendingSnapshot {
        PendingSnapshot {
            loading: self.is_loading(),
            submitted: self.is_submitted(),
        }
    }

    pub(crate) fn begin(&self) {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        self.submitted.store(true, Ordering::Release);
    }

    pub(crate) fn finish_loading(&self) {
        let _ = self
            .in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// Lowers `submitted` unless another call is still in flight.
    pub(crate) fn clear_submitted(&self) {
        if self.in_flight() == 0 {
            self.submitted.store(false, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flags_are_idle() {
        assert_eq!(PendingFlags::new().snapshot(), PendingSnapshot::default());
    }

    #[test]
    fn begin_raises_both_flags() {
        let flags = PendingFlags::new();
        flags.begin();

        assert!(flags.is_loading());
        assert!(flags.is_submitted());
    }

    #[test]
    fn finish_loading_keeps_submitted() {
        let flags = PendingFlags::new();
        flags.begin();
        flags.finish_loading();

        assert_eq!(
            flags.snapshot(),
            PendingSnapshot {
                loading: false,
                submitted: true
            }
        );
    }

    #[test]
    fn loading_stays_up_until_every_call_settles() {
        let flags = PendingFlags::new();
        flags.begin();
        flags.begin();

        flags.finish_loading();
        assert!(flags.is_loading());
        assert_eq!(flags.in_flight(), 1);

        flags.finish_loading();
        assert!(!flags.is_loading());
    }

    #[test]
    fn success_does_not_lower_submitted_for_a_call_in_flight() {
        let flags = PendingFlags::new();
        flags.begin();
        flags.begin();

        flags.finish_loading();
        flags.clear_submitted();
        assert!(flags.is_submitted());

        flags.finish_loading();
        flags.clear_submitted();
        assert!(!flags.is_submitted());
    }

    #[test]
    fn extra_finish_does_not_underflow() {
        let flags = PendingFlags::new();
        flags.finish_loading();
        assert_eq!(flags.in_flight(), 0);
    }
}
