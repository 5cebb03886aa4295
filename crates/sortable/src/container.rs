//! The sortable container.
//!
//! [`Sortable`] is the host-facing shell around [`DragController`]. It is the
//! [`ItemEvents`] handler table every item forwards to, runs host observers
//! after each event, and produces the [`SortableView`] a renderer draws.
//!
//! # Example
//!
//! ```
//! use sortable::{ItemEvents, Point, Rect, Sortable};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::{Duration, Instant};
//!
//! let mut list = Sortable::new(["first", "second", "third"]);
//! let moved_to = Arc::new(AtomicUsize::new(usize::MAX));
//! let sink = moved_to.clone();
//! list.connect_child_index_changed(move |change| {
//!     sink.store(change.new_index, Ordering::SeqCst);
//! });
//!
//! for index in 0..3 {
//!     list.on_layout(index, Rect::new(0.0, 50.0 * index as f32, 100.0, 50.0));
//! }
//!
//! let start = Instant::now();
//! list.on_grant(0, Point::new(50.0, 25.0));
//! list.on_move(0, Point::new(50.0, 125.0));
//! list.release_at(0, Point::new(50.0, 125.0), start);
//! assert_eq!(list.order(), vec![1, 2, 0]);
//!
//! list.process_timers_at(start + Duration::from_millis(192));
//! assert_eq!(moved_to.load(Ordering::SeqCst), 2);
//! ```

use std::time::{Duration, Instant};

use sortable_core::logging::targets;
use sortable_core::{ConnectionId, Signal, TimerId};

use crate::animation::AnimationDriver;
use crate::child::SortableItem;
use crate::config::SortableConfig;
use crate::controller::{DragController, DragState, ReleaseOutcome};
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::handlers::{ItemEvents, ItemObserver};
use crate::reorder::IndexChange;
use crate::session::ShadowProxy;

/// A list whose children can be dragged into a new order.
pub struct Sortable<T> {
    controller: DragController<T>,
    observers: Vec<Box<dyn ItemObserver>>,
}

impl<T> std::fmt::Debug for Sortable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sortable")
            .field("controller", &self.controller)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T> Sortable<T> {
    /// Create a container for `children` with the default configuration.
    pub fn new(children: impl IntoIterator<Item = T>) -> Self {
        Self::with_config(children, SortableConfig::default())
    }

    /// Create a container for `children` with `config`.
    pub fn with_config(children: impl IntoIterator<Item = T>, config: SortableConfig) -> Self {
        Self {
            controller: DragController::with_config(children, config),
            observers: Vec::new(),
        }
    }

    /// The underlying state machine.
    pub fn controller(&self) -> &DragController<T> {
        &self.controller
    }

    /// Mutable access to the underlying state machine.
    pub fn controller_mut(&mut self) -> &mut DragController<T> {
        &mut self.controller
    }

    /// The reorder notification signal.
    pub fn child_index_changed(&self) -> &Signal<IndexChange> {
        self.controller.child_index_changed()
    }

    /// Connect a reorder notification callback.
    ///
    /// The callback runs once per changed reorder, after the crossfade.
    pub fn connect_child_index_changed<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&IndexChange) + Send + Sync + 'static,
    {
        self.controller.child_index_changed().connect(callback)
    }

    /// Disconnect a callback connected with
    /// [`connect_child_index_changed`](Self::connect_child_index_changed).
    pub fn disconnect_child_index_changed(&self, id: ConnectionId) -> bool {
        self.controller.child_index_changed().disconnect(id)
    }

    /// Install the host's layout animation driver.
    pub fn set_animation_driver(&mut self, driver: impl AnimationDriver + 'static) {
        self.controller.set_animation_driver(driver);
    }

    /// Add an observer called after each item event.
    pub fn add_observer(&mut self, observer: impl ItemObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replace the children, resetting every derived state.
    pub fn set_children(&mut self, children: impl IntoIterator<Item = T>) {
        self.controller.replace_children(children);
    }

    /// Current drag state.
    pub fn state(&self) -> DragState {
        self.controller.state()
    }

    /// The items in display order.
    pub fn items(&self) -> &[SortableItem<T>] {
        self.controller.items()
    }

    /// Materialization indices in display order.
    pub fn order(&self) -> Vec<usize> {
        self.controller.order()
    }

    /// Where the shadow is drawn while a drag is open.
    pub fn shadow_rect(&self) -> Option<Rect> {
        self.controller.shadow_rect()
    }

    /// Handle a release at an explicit instant.
    ///
    /// [`ItemEvents::on_release`] calls this with [`Instant::now`].
    pub fn release_at(&mut self, index: usize, pointer: Point, now: Instant) -> Option<ReleaseOutcome> {
        let outcome = log_ignored(index, self.controller.release_at(index, pointer, now));
        for observer in &mut self.observers {
            observer.on_release(index, pointer);
        }
        outcome
    }

    /// Deliver due notifications. Call from the host event loop.
    pub fn process_timers(&mut self) -> usize {
        self.process_timers_at(Instant::now())
    }

    /// Deliver notifications due at `now`.
    pub fn process_timers_at(&mut self, now: Instant) -> usize {
        self.controller.process_timers_at(now)
    }

    /// Time until the next notification is due.
    pub fn time_until_next_notification(&mut self, now: Instant) -> Option<Duration> {
        self.controller.time_until_next_notification(now)
    }

    /// Drop a queued notification before it fires.
    pub fn cancel_notification(&mut self, id: TimerId) -> Result<IndexChange> {
        self.controller.cancel_notification(id)
    }

    /// Notifications still waiting for their crossfade to end.
    pub fn pending_notification_count(&self) -> usize {
        self.controller.pending_notification_count()
    }

    /// What to draw right now.
    pub fn view(&mut self) -> SortableView<'_, T> {
        self.view_at(Instant::now())
    }

    /// What to draw at `now`.
    pub fn view_at(&mut self, now: Instant) -> SortableView<'_, T> {
        let opacity = self.controller.transition_opacity_at(now);
        let items = self.controller.items();
        let shadow = self.controller.shadow().and_then(|proxy| {
            items
                .iter()
                .find(|item| item.child() == proxy.source())
                .map(|item| ShadowView {
                    proxy: *proxy,
                    content: item.content(),
                })
        });
        SortableView {
            items,
            shadow,
            opacity,
        }
    }
}

impl<T> ItemEvents for Sortable<T> {
    fn on_layout(&mut self, index: usize, rect: Rect) {
        log_ignored(index, self.controller.report_layout(index, rect));
        for observer in &mut self.observers {
            observer.on_layout(index, rect);
        }
    }

    fn should_become_responder(&self, index: usize) -> bool {
        self.controller.should_become_responder(index)
    }

    fn on_grant(&mut self, index: usize, pointer: Point) {
        log_ignored(index, self.controller.grant(index, pointer));
        for observer in &mut self.observers {
            observer.on_grant(index, pointer);
        }
    }

    fn on_move(&mut self, index: usize, pointer: Point) {
        log_ignored(index, self.controller.move_to(index, pointer));
        for observer in &mut self.observers {
            observer.on_move(index, pointer);
        }
    }

    fn on_release(&mut self, index: usize, pointer: Point) {
        self.release_at(index, pointer, Instant::now());
    }
}

fn log_ignored<R>(index: usize, result: Result<R>) -> Option<R> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(target: targets::DRAG, index, %err, "event ignored");
            None
        }
    }
}

/// A snapshot for rendering: the ordered items, then the shadow on top.
#[derive(Debug)]
pub struct SortableView<'a, T> {
    /// Items in display order. The grabbed item stays in place underneath
    /// its shadow.
    pub items: &'a [SortableItem<T>],
    /// The floating duplicate of the grabbed item, if a drag is open.
    pub shadow: Option<ShadowView<'a, T>>,
    /// Crossfade opacity for the list (1.0 when no transition runs).
    pub opacity: f32,
}

/// The shadow proxy together with the content it duplicates.
#[derive(Debug)]
pub struct ShadowView<'a, T> {
    /// Position and interactivity of the proxy.
    pub proxy: ShadowProxy,
    /// The grabbed item's content.
    pub content: &'a T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PointerEvents;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn stacked() -> Sortable<&'static str> {
        let mut list = Sortable::new(["a", "b", "c"]);
        for index in 0..3 {
            list.on_layout(index, Rect::new(0.0, 50.0 * index as f32, 100.0, 50.0));
        }
        list
    }

    struct Log(Arc<Mutex<Vec<String>>>);

    impl ItemObserver for Log {
        fn on_grant(&mut self, index: usize, _pointer: Point) {
            self.0.lock().push(format!("grant {index}"));
        }

        fn on_release(&mut self, index: usize, _pointer: Point) {
            self.0.lock().push(format!("release {index}"));
        }
    }

    #[test]
    fn test_view_includes_shadow_while_dragging() {
        let mut list = stacked();
        list.on_grant(1, Point::new(10.0, 60.0));
        list.on_move(1, Point::new(10.0, 80.0));

        let view = list.view();
        assert_eq!(view.items.len(), 3);
        let shadow = view.shadow.as_ref().unwrap();
        assert_eq!(*shadow.content, "b");
        assert_eq!(shadow.proxy.rect(), Rect::new(0.0, 70.0, 100.0, 50.0));
        assert_eq!(shadow.proxy.pointer_events(), PointerEvents::None);
        assert_eq!(view.opacity, 1.0);
    }

    #[test]
    fn test_view_after_reorder_crossfades() {
        let mut list = stacked();
        let start = Instant::now();
        list.on_grant(0, Point::new(50.0, 25.0));
        list.release_at(0, Point::new(50.0, 125.0), start);

        let view = list.view_at(start + Duration::from_millis(96));
        assert!(view.shadow.is_none());
        assert!((view.opacity - 0.5).abs() < 0.001);
        let contents: Vec<&str> = view.items.iter().map(|item| *item.content()).collect();
        assert_eq!(contents, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_observers_run_even_when_event_ignored() {
        let mut list = Sortable::new(["a", "b"]);
        let log = Arc::new(Mutex::new(Vec::new()));
        list.add_observer(Log(log.clone()));

        // No layout reported: the grant is dropped, the observer still sees it.
        list.on_grant(0, Point::ZERO);
        list.on_release(0, Point::ZERO);

        assert_eq!(list.state(), DragState::Idle);
        assert_eq!(*log.lock(), vec!["grant 0", "release 0"]);
    }

    #[test]
    fn test_release_outcome_is_reported() {
        let mut list = stacked();
        let start = Instant::now();
        list.on_grant(2, Point::new(50.0, 125.0));
        let outcome = list.release_at(2, Point::new(50.0, 25.0), start).unwrap();
        assert_eq!(outcome.change(), Some(IndexChange::new(2, 0)));

        assert!(list.release_at(2, Point::ZERO, start).is_none());
    }

    #[test]
    fn test_disconnect_callback() {
        let list = stacked();
        let id = list.connect_child_index_changed(|_| {});
        assert!(list.child_index_changed().has_connections());
        assert!(list.disconnect_child_index_changed(id));
        assert!(!list.child_index_changed().has_connections());
    }

    #[test]
    fn test_set_children_resets() {
        let mut list = stacked();
        list.on_grant(0, Point::ZERO);
        list.set_children(["x"]);
        assert_eq!(list.state(), DragState::Idle);
        assert!(list.shadow_rect().is_none());
        assert_eq!(list.order(), vec![0]);
    }
}
