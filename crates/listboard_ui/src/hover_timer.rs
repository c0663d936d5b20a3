//! Single-shot drag-hover auto-expand timer
//!
//! Armed when a drag payload starts hovering over a collapsed section. If
//! nothing cancels it within [`HOVER_EXPAND_DELAY`], the next poll reports it
//! fired and the timer returns to idle. Firing and cancellation are mutually
//! exclusive for one armed period: whichever the owner observes first wins.

use std::time::Duration;

use web_time::Instant;

use crate::constants::HOVER_EXPAND_DELAY;

/// Lifecycle of the hover timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverTimerState {
    /// No hover window in progress
    #[default]
    Idle,
    /// Waiting for `deadline`
    Armed { deadline: Instant },
}

/// Cancelable single-shot delay owned by a section.
#[derive(Debug, Clone)]
pub struct DragHoverTimer {
    state: HoverTimerState,
    delay: Duration,
}

impl Default for DragHoverTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl DragHoverTimer {
    pub fn new() -> Self {
        Self {
            state: HoverTimerState::Idle,
            delay: HOVER_EXPAND_DELAY,
        }
    }

    /// Override the hover delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn state(&self) -> HoverTimerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, HoverTimerState::Armed { .. })
    }

    /// Start a hover window at `now`. Returns `false` if one is already running.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.is_armed() {
            return false;
        }
        self.state = HoverTimerState::Armed {
            deadline: now + self.delay,
        };
        log::debug!("DragHoverTimer: armed for {:?}", self.delay);
        true
    }

    /// Abort the current hover window. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        if !self.is_armed() {
            return false;
        }
        self.state = HoverTimerState::Idle;
        log::debug!("DragHoverTimer: canceled");
        true
    }

    /// Check the deadline. Returns `true` exactly once per uncanceled armed period.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            HoverTimerState::Armed { deadline } if now >= deadline => {
                self.state = HoverTimerState::Idle;
                log::debug!("DragHoverTimer: fired");
                true
            }
            _ => false,
        }
    }

    /// Time left in the current window, if armed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            HoverTimerState::Armed { deadline } => Some(deadline.saturating_duration_since(now)),
            HoverTimerState::Idle => None,
        }
    }
}
