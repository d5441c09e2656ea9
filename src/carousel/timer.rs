//! Deterministic timer queue.
//!
//! Stands in for the browser's `setTimeout`/`setInterval` so the controller
//! can run on a virtual clock. Nothing here sleeps: time only moves when the
//! owner drains due timers with [`TimerQueue::pop_due`] and then calls
//! [`TimerQueue::settle`].
//!
//! Timers due at the same instant fire in the order they were first
//! scheduled. A repeating timer keeps its id across firings.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle returned by the `schedule_*` methods, used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer does when it fires. The queue itself attaches no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Repeating auto-advance to the next slide.
    AutoAdvance,
    /// One-shot release of the transition lock.
    Unlock,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    pub at: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    kind: TimerKind,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), Pending>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from construction.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        self.insert(self.now + delay, kind, None)
    }

    /// Schedule `kind` every `period`, first firing one period from now.
    pub fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerId {
        // A zero period would never let the clock move past `now`.
        let period = period.max(Duration::from_millis(1));
        self.insert(self.now + period, kind, Some(period))
    }

    /// Cancel a pending timer. Returns `false` if it already fired (one-shot)
    /// or was never scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|&(_, tid), _| tid != id);
        self.pending.len() != before
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Deadline of a pending timer.
    pub fn deadline_of(&self, id: TimerId) -> Option<Duration> {
        self.pending
            .keys()
            .find(|&&(_, tid)| tid == id)
            .map(|&(deadline, _)| deadline)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline. Repeating timers are re-armed one
    /// period later before this returns.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let (&(deadline, id), _) = self.pending.first_key_value()?;
        if deadline > until {
            return None;
        }
        let timer = self.pending.remove(&(deadline, id))?;
        self.now = self.now.max(deadline);
        if let Some(period) = timer.period {
            self.pending.insert((deadline + period, id), timer);
        }
        Some(Fired {
            id,
            kind: timer.kind,
            at: deadline,
        })
    }

    /// Move the clock forward to `until` once nothing more is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, deadline: Duration, kind: TimerKind, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((deadline, id), Pending { kind, period });
        id
    }
}

#[cfg(test)]
impl TimerQueue {
    fn is_pending(&self, id: TimerId) -> bool {
        self.pending.keys().any(|&(_, tid)| tid == id)
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|&(deadline, _)| deadline)
    }
}
