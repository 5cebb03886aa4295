//! Logging facilities for Sortable.
//!
//! Sortable uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! Levels are used consistently across the workspace: layout reports and
//! pointer moves are `trace`, grants, releases and ignored events are
//! `debug`, and integration mistakes (such as reordering with nobody
//! listening) are `warn`.

/// Span names used throughout Sortable for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Release handling span (hit test, reorder, scheduling).
    pub const RELEASE: &str = "sortable::release";
    /// Signal emission span.
    pub const SIGNAL: &str = "sortable::signal";
    /// Timer processing span.
    pub const TIMER: &str = "sortable::timer";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=sortable::drag=debug`.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "sortable_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "sortable_core::signal";
    /// Timer system target.
    pub const TIMER: &str = "sortable_core::timer";
    /// Drag lifecycle target (grant, move, release).
    pub const DRAG: &str = "sortable::drag";
    /// Reorder engine and hit testing target.
    pub const REORDER: &str = "sortable::reorder";
    /// Layout registry target.
    pub const LAYOUT: &str = "sortable::layout";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "sortable::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` crate macros with
/// consistent target naming.
#[macro_export]
macro_rules! sortable_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "sortable_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! sortable_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "sortable_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! sortable_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "sortable_core", $($arg)*)
    };
}
