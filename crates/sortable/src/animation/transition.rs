//! Layout transition descriptions and crossfade progress tracking.
//!
//! A [`LayoutAnimation`] is what the container hands to the host's animation
//! driver before a reordered list becomes visible. A [`Transition`] tracks the
//! same animation on the container side so a renderer can ask how far the
//! crossfade has progressed at any instant.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::easing::{Easing, ease};

/// Fixed duration of the post-release crossfade.
///
/// The host is notified of a reorder only after this much time has passed.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(192);

/// The property a layout transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatedProperty {
    /// Crossfade between the old and new arrangement.
    #[default]
    Opacity,
    /// Scale items in from their new positions.
    ScaleXy,
}

/// Description of the next layout transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAnimation {
    /// How long the transition runs.
    pub duration: Duration,
    /// Easing applied to the transition progress.
    pub easing: Easing,
    /// The animated property.
    pub property: AnimatedProperty,
}

impl Default for LayoutAnimation {
    fn default() -> Self {
        Self {
            duration: ANIMATION_DURATION,
            easing: Easing::Linear,
            property: AnimatedProperty::Opacity,
        }
    }
}

impl LayoutAnimation {
    /// Create a transition description.
    pub fn new(duration: Duration, easing: Easing, property: AnimatedProperty) -> Self {
        Self {
            duration,
            easing,
            property,
        }
    }
}

/// Current state of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    /// No transition in progress.
    #[default]
    Idle,
    /// Transition is running.
    Running {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
        /// List position the moved item left.
        from_index: usize,
        /// List position the moved item landed on.
        to_index: usize,
    },
}

impl TransitionState {
    /// Check if a transition is currently in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, TransitionState::Running { .. })
    }

    /// Get the current progress if running.
    pub fn progress(&self) -> Option<f32> {
        match self {
            TransitionState::Running { progress, .. } => Some(*progress),
            TransitionState::Idle => None,
        }
    }
}

/// Tracks the timing of the crossfade that follows a reorder.
#[derive(Debug, Clone)]
pub struct Transition {
    animation: LayoutAnimation,
    /// When the transition started (if running).
    start_time: Option<Instant>,
    from_index: usize,
    to_index: usize,
}

impl Transition {
    /// Create an idle transition that will run `animation` when started.
    pub fn new(animation: LayoutAnimation) -> Self {
        Self {
            animation,
            start_time: None,
            from_index: 0,
            to_index: 0,
        }
    }

    /// The animation this transition runs.
    #[inline]
    pub fn animation(&self) -> &LayoutAnimation {
        &self.animation
    }

    /// Start the transition at `now`, replacing any running one.
    pub fn start_at(&mut self, now: Instant, from_index: usize, to_index: usize) {
        self.from_index = from_index;
        self.to_index = to_index;
        self.start_time = Some(now);
    }

    /// Stop the current transition immediately.
    pub fn stop(&mut self) {
        self.start_time = None;
    }

    /// Get the transition state at `now`.
    ///
    /// Once the duration has elapsed the transition stops itself and reports
    /// `Idle`.
    pub fn update_at(&mut self, now: Instant) -> TransitionState {
        let Some(start_time) = self.start_time else {
            return TransitionState::Idle;
        };

        let elapsed = now.saturating_duration_since(start_time);
        let duration = self.animation.duration;
        let raw_progress = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        };

        if raw_progress >= 1.0 {
            self.start_time = None;
            return TransitionState::Idle;
        }

        TransitionState::Running {
            progress: ease(self.animation.easing, raw_progress),
            from_index: self.from_index,
            to_index: self.to_index,
        }
    }

    /// Check whether the transition is still running at `now`.
    pub fn is_running_at(&mut self, now: Instant) -> bool {
        self.update_at(now).is_running()
    }

    /// Opacity of the reordered list at `now` (1.0 when idle).
    pub fn opacity_at(&mut self, now: Instant) -> f32 {
        match (self.animation.property, self.update_at(now)) {
            (AnimatedProperty::Opacity, TransitionState::Running { progress, .. }) => progress,
            _ => 1.0,
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(LayoutAnimation::default())
    }
}
