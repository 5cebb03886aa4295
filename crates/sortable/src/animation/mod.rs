//! Animation support for the sortable container.
//!
//! The container does not interpolate anything itself. It describes the
//! transition it wants ([`LayoutAnimation`]), hands that description to the
//! host's [`AnimationDriver`], and tracks elapsed progress ([`Transition`])
//! so the deferred notification and any renderer agree on timing.
//!
//! # Example
//!
//! ```
//! use sortable::animation::{ease, Easing};
//!
//! let eased = ease(Easing::EaseInOut, 0.5);
//! assert_eq!(eased, 0.5);
//! ```

mod easing;
mod transition;

pub use easing::{Easing, ease};
pub use transition::{
    ANIMATION_DURATION, AnimatedProperty, LayoutAnimation, Transition, TransitionState,
};

/// Runs layout transitions on behalf of the container.
///
/// Implemented by the host's animation layer. The container calls
/// [`configure_next`](Self::configure_next) right before it commits a
/// reordered list, so the next layout pass is animated.
pub trait AnimationDriver {
    /// Animate the next layout change with `animation`.
    fn configure_next(&mut self, animation: &LayoutAnimation);
}

impl<F> AnimationDriver for F
where
    F: FnMut(&LayoutAnimation),
{
    fn configure_next(&mut self, animation: &LayoutAnimation) {
        self(animation)
    }
}
