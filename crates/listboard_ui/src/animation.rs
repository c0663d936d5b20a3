//! Expand/collapse height animation
//!
//! The animator owns a linear progress value in `[0, 1]` that moves toward a
//! target bound at a fixed rate (full range in [`EXPAND_ANIMATION_DURATION`]).
//! The rendered height factor is an ease-in curve of that progress. Because the
//! curve depends only on progress, retargeting mid-flight reverses smoothly from
//! wherever the animation currently is.
//!
//! The animator is driven by a frame scheduler calling [`ExpansionAnimator::tick`].
//! It never reads the clock itself.

use std::time::Duration;

use web_time::Instant;

use crate::constants::{EXPAND_ANIMATION_DURATION, FLOAT_EPSILON};

/// Cubic ease-in (slow start, fast end)
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Where the animation is relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// At rest at 0.0
    Collapsed,
    /// Moving toward 1.0
    Expanding,
    /// At rest at 1.0
    Expanded,
    /// Moving toward 0.0
    Collapsing,
}

/// Reported once when progress comes to rest at a bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Expanded,
    Collapsed,
}

/// Interruptible, reversible height animation for one section.
#[derive(Debug, Clone)]
pub struct ExpansionAnimator {
    /// Linear progress, 0.0 = collapsed, 1.0 = expanded
    progress: f32,
    /// Bound the progress is moving toward
    target: f32,
    /// Time to cover the full range
    duration: Duration,
    /// Timestamp of the previous frame while in flight
    last_frame: Option<Instant>,
    /// Expanded content need not be retained while this is set
    content_detached: bool,
    disposed: bool,
}

impl ExpansionAnimator {
    /// Create an animator at rest at the bound matching `expanded`.
    pub fn new(expanded: bool) -> Self {
        let bound = if expanded { 1.0 } else { 0.0 };
        Self {
            progress: bound,
            target: bound,
            duration: EXPAND_ANIMATION_DURATION,
            last_frame: None,
            content_detached: !expanded,
            disposed: false,
        }
    }

    /// Override the transition duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Point the animation at the bound for `expanded`.
    ///
    /// A change while in flight reverses from the current progress; setting the
    /// current target again does nothing.
    pub fn set_target(&mut self, expanded: bool) {
        if self.disposed {
            return;
        }

        let target = if expanded { 1.0 } else { 0.0 };
        if target == self.target {
            return;
        }

        if self.is_settled() {
            // Starting from rest: the next tick only records the frame time
            self.last_frame = None;
        }
        self.target = target;

        if expanded {
            self.content_detached = false;
        }

        log::trace!(
            "ExpansionAnimator: target={} from progress={:.3}",
            self.target,
            self.progress
        );
    }

    /// Advance to `now`. Returns `Some` exactly once when a bound is reached.
    pub fn tick(&mut self, now: Instant) -> Option<Settled> {
        if self.disposed || self.is_settled() {
            return None;
        }

        let Some(last) = self.last_frame.replace(now) else {
            return None;
        };

        let elapsed = now.saturating_duration_since(last);
        let step = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };

        self.progress = if self.target > self.progress {
            (self.progress + step).min(self.target)
        } else {
            (self.progress - step).max(self.target)
        };
        if (self.progress - self.target).abs() < FLOAT_EPSILON {
            self.progress = self.target;
        }

        log::trace!("ExpansionAnimator: progress={:.3}", self.progress);

        if !self.is_settled() {
            return None;
        }

        self.last_frame = None;
        if self.target == 0.0 {
            self.content_detached = true;
            Some(Settled::Collapsed)
        } else {
            Some(Settled::Expanded)
        }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Eased height factor to scale the item region by
    pub fn height_factor(&self) -> f32 {
        ease_in_cubic(self.progress)
    }

    /// Progress is at rest on its target bound
    pub fn is_settled(&self) -> bool {
        self.progress == self.target
    }

    pub fn is_animating(&self) -> bool {
        !self.disposed && !self.is_settled()
    }

    pub fn status(&self) -> AnimationStatus {
        match (self.is_settled(), self.target == 1.0) {
            (true, true) => AnimationStatus::Expanded,
            (true, false) => AnimationStatus::Collapsed,
            (false, true) => AnimationStatus::Expanding,
            (false, false) => AnimationStatus::Collapsing,
        }
    }

    /// The expanded content subtree may be dropped until expansion resumes
    pub fn content_detached(&self) -> bool {
        self.content_detached
    }

    /// Stop driving the animation. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.last_frame = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
