//! Single pending tick per game session.
//!
//! Each tick re-schedules the next one with a delay computed from the current score, so the
//! timer is one-shot rather than periodic. Starting a new session bumps the generation and
//! drops whatever was pending, which keeps a tick from a finished run from firing in the new
//! one.
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub session: u64,
    pub deadline: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    session: u64,
    pending: Option<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the pending tick and opens a new session.
    pub fn begin_session(&mut self) -> u64 {
        if let Some(stale) = self.pending.take() {
            tracing::debug!(session = stale.session, "dropping pending tick of previous session");
        }
        self.session += 1;
        self.session
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Replaces any pending tick with one firing `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.pending = Some(Pending {
            session: self.session,
            deadline: now + delay,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Time left until the pending tick, zero if it is already due.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|p| p.deadline.saturating_duration_since(now))
    }

    /// Takes the pending tick if it is due.
    pub fn take_due(&mut self, now: Instant) -> Option<Pending> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        Some(pending)
    }
}
