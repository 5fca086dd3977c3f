// src/explore/debounce.rs
use std::time::{Duration, Instant};

/// Trailing-edge debounce over caller-supplied instants.
///
/// `push` records the latest input; `poll` hands back the settled value,
/// which only moves once the input has been stable for `delay`. A burst of
/// pushes therefore produces a single trailing update.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    settled: T,
    pending: Option<(T, Instant)>,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            delay,
        }
    }

    /// Record a new input value seen at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        // Same value again: keep the original quiet-period start.
        let unchanged = match &self.pending {
            Some((pending, _)) => *pending == value,
            None => self.settled == value,
        };
        if !unchanged {
            self.pending = Some((value, now));
        }
    }

    /// Promote the pending value if it has been quiet for `delay`.
    pub fn poll(&mut self, now: Instant) -> &T {
        if let Some((_, since)) = &self.pending {
            if now.saturating_duration_since(*since) >= self.delay {
                if let Some((value, _)) = self.pending.take() {
                    self.settled = value;
                }
            }
        }
        &self.settled
    }

    /// Time left until the pending value settles, if one is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|(_, since)| {
            self.delay
                .saturating_sub(now.saturating_duration_since(*since))
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest input, settled or not.
    pub fn latest(&self) -> &T {
        self.pending.as_ref().map(|(v, _)| v).unwrap_or(&self.settled)
    }
}
