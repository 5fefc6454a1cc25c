//! Coalescing of edit notifications into a single re-index.
//!
//! Each qualifying edit re-arms one idle timer; the re-index runs only once
//! the timer has elapsed without another edit. The scheduler is a pure data
//! structure: the caller passes the current time in and polls for expiry.

use std::time::{Duration, Instant};

/// Default idle window in milliseconds.
pub const DEFAULT_IDLE_MS: u64 = 500;

/// Which views a re-index covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
    /// Every visible view.
    AllVisible,
    /// Only views showing the focused document.
    ActiveOnly,
}

/// Single-slot idle timer.
#[derive(Debug, Clone)]
pub struct DebounceScheduler {
    deadline: Option<Instant>,
    idle: Duration,
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_MS)
    }
}

impl DebounceScheduler {
    pub fn new(idle_ms: u64) -> Self {
        Self {
            deadline: None,
            idle: Duration::from_millis(idle_ms),
        }
    }

    pub fn idle_window(&self) -> Duration {
        self.idle
    }

    /// Cancel any pending deadline and start a new idle window at `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.idle);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True exactly once per armed window, when `now` has reached the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
