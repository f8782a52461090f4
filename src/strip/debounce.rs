//! Cancel-and-reschedule debouncing for focus updates.

use std::time::{Duration, Instant};

/// A value waiting out its quiescence window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Coalesces a burst of calls into one delayed value.
///
/// Each [`schedule`](Debouncer::schedule) replaces any pending value and
/// restarts the quiescence window, so only the most recent value of a burst
/// is ever committed (last-call-wins, never queued). [`poll`](Debouncer::poll)
/// hands the value out once the window has elapsed with no newer call.
///
/// At most one pending value exists per instance. Dropping the debouncer,
/// or calling [`cancel`](Debouncer::cancel), releases it so nothing fires
/// after teardown.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedules `value` for commit once the window elapses, cancelling any
    /// previously pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.window,
        });
    }

    /// Drops the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Commits and returns the pending value if its deadline has passed.
    ///
    /// Intermediate values replaced by a newer `schedule` are never
    /// observable here.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending.take().map(|p| p.value)
            }
            _ => None,
        }
    }
}
