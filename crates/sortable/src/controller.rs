//! The drag lifecycle state machine.
//!
//! [`DragController`] owns everything a sortable list needs between events:
//! the ordered items, the layout registry, the (at most one) drag session
//! with its shadow proxy, the crossfade transition and the queue of
//! deferred notifications.
//!
//! # State machine
//!
//! ```text
//!  Idle --grant--> Grabbed --move--> Grabbed --release--> Idle
//!    ^                                                     |
//!    +---------------- replace_children (any state) -------+
//! ```
//!
//! Every operation either applies completely or returns an error and leaves
//! the controller untouched.

use std::collections::HashMap;
use std::mem;
use std::time::{Duration, Instant};

use sortable_core::logging::{span_names, targets};
use sortable_core::{PerfSpan, Signal, TimerError, TimerId, TimerManager};

use crate::animation::{AnimationDriver, Transition, TransitionState};
use crate::child::{ChildRef, SortableItem, materialize};
use crate::config::{PendingPolicy, ReorderPolicy, SortableConfig};
use crate::error::{Result, SortableError};
use crate::geometry::{Point, Rect};
use crate::hit_test::hit_test;
use crate::registry::LayoutRegistry;
use crate::reorder::{IndexChange, Reorder, reorder};
use crate::session::{DragSession, ShadowProxy};

/// Current drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag is active.
    #[default]
    Idle,
    /// A child has been granted and is following the pointer.
    Grabbed,
}

/// What a release did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The list was reordered and a transition started.
    Reordered {
        /// The applied move, in list positions.
        change: IndexChange,
        /// The timer that will deliver the notification.
        notification: TimerId,
    },
    /// No sibling was located, or the item landed where it started.
    Unchanged,
    /// A sibling was located but nobody listens and the policy is
    /// [`ReorderPolicy::OnlyIfListener`].
    Suppressed,
}

impl ReleaseOutcome {
    /// The applied move, if the list was reordered.
    pub fn change(&self) -> Option<IndexChange> {
        match *self {
            ReleaseOutcome::Reordered { change, .. } => Some(change),
            _ => None,
        }
    }

    /// Returns true if the list order changed.
    #[inline]
    pub fn is_reordered(&self) -> bool {
        matches!(self, ReleaseOutcome::Reordered { .. })
    }
}

/// Orchestrates grant, move and release for one sortable list.
///
/// Instances are fully independent: each owns its registry, session and
/// timers.
pub struct DragController<T> {
    config: SortableConfig,
    items: Vec<SortableItem<T>>,
    registry: LayoutRegistry,
    session: Option<DragSession>,
    shadow: Option<ShadowProxy>,
    transition: Transition,
    timers: TimerManager,
    pending: HashMap<TimerId, IndexChange>,
    driver: Option<Box<dyn AnimationDriver>>,
    child_index_changed: Signal<IndexChange>,
}

impl<T> std::fmt::Debug for DragController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("config", &self.config)
            .field("len", &self.items.len())
            .field("session", &self.session)
            .field("pending", &self.pending.len())
            .field("has_driver", &self.driver.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> DragController<T> {
    /// Create a controller for `children` with the default configuration.
    pub fn new(children: impl IntoIterator<Item = T>) -> Self {
        Self::with_config(children, SortableConfig::default())
    }

    /// Create a controller for `children` with `config`.
    pub fn with_config(children: impl IntoIterator<Item = T>, config: SortableConfig) -> Self {
        Self {
            config,
            items: materialize(children),
            registry: LayoutRegistry::new(),
            session: None,
            shadow: None,
            transition: Transition::new(config.transition),
            timers: TimerManager::new(),
            pending: HashMap::new(),
            driver: None,
            child_index_changed: Signal::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    /// Emitted with `{old_index, new_index}` once the transition that
    /// follows a reorder has finished.
    pub fn child_index_changed(&self) -> &Signal<IndexChange> {
        &self.child_index_changed
    }

    /// Install the driver that animates the next layout after a reorder.
    pub fn set_animation_driver(&mut self, driver: impl AnimationDriver + 'static) {
        self.driver = Some(Box::new(driver));
    }

    /// Remove the installed animation driver.
    pub fn clear_animation_driver(&mut self) {
        self.driver = None;
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Current drag state.
    pub fn state(&self) -> DragState {
        if self.session.is_some() {
            DragState::Grabbed
        } else {
            DragState::Idle
        }
    }

    /// Returns true if a child is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The items in display order.
    pub fn items(&self) -> &[SortableItem<T>] {
        &self.items
    }

    /// Materialization indices in display order.
    pub fn order(&self) -> Vec<usize> {
        self.items.iter().map(SortableItem::index).collect()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recorded layouts.
    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    /// The open drag session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// The shadow proxy, present exactly while a drag is open.
    pub fn shadow(&self) -> Option<&ShadowProxy> {
        self.shadow.as_ref()
    }

    /// Where the shadow is drawn, for driving an animated position value.
    pub fn shadow_rect(&self) -> Option<Rect> {
        self.shadow.map(|shadow| shadow.rect())
    }

    /// State of the post-reorder crossfade at `now`.
    pub fn transition_state_at(&mut self, now: Instant) -> TransitionState {
        self.transition.update_at(now)
    }

    /// Opacity of the list at `now`; 1.0 unless a crossfade is running.
    pub fn transition_opacity_at(&mut self, now: Instant) -> f32 {
        self.transition.opacity_at(now)
    }

    /// Notifications waiting for their transition to finish.
    pub fn pending_notification_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the next notification is due, if any is pending.
    pub fn time_until_next_notification(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Record the bounding box reported by the child at `index`.
    ///
    /// Reports are stored unconditionally for members of the current list.
    /// An index outside the list is rejected with
    /// [`SortableError::UnknownChild`] and leaves the registry untouched.
    pub fn report_layout(&mut self, index: usize, rect: Rect) -> Result<()> {
        let child = self.child(index)?;
        self.registry.record(child, rect);
        Ok(())
    }

    /// Whether the child at `index` should become the gesture responder.
    ///
    /// Always true: every child is draggable.
    pub fn should_become_responder(&self, _index: usize) -> bool {
        true
    }

    /// Start dragging the child at `index`, pressed at `pointer`.
    pub fn grant(&mut self, index: usize, pointer: Point) -> Result<()> {
        if let Some(session) = &self.session {
            return Err(SortableError::SessionActive {
                grabbed: session.grabbed().index(),
            });
        }
        let child = self.child(index)?;
        let origin_rect = self
            .registry
            .get(child)
            .ok_or(SortableError::MissingLayout { index })?;

        self.session = Some(DragSession::new(child, origin_rect, pointer));
        self.shadow = Some(ShadowProxy::new(child, origin_rect));
        tracing::debug!(target: targets::DRAG, index, ?pointer, ?origin_rect, "drag granted");
        Ok(())
    }

    /// Move the shadow of the grabbed child to follow `pointer`.
    ///
    /// Returns the new shadow box. No hit testing happens here.
    pub fn move_to(&mut self, index: usize, pointer: Point) -> Result<Rect> {
        self.check_grabbed(index)?;
        let (Some(session), Some(shadow)) = (self.session.as_mut(), self.shadow.as_mut()) else {
            return Err(SortableError::NoActiveSession);
        };
        let rect = session.update(pointer);
        shadow.set_rect(rect);
        tracing::trace!(target: targets::DRAG, index, ?pointer, ?rect, "drag moved");
        Ok(rect)
    }

    /// Release the grabbed child at `pointer`.
    ///
    /// The session and shadow are torn down before anything else happens,
    /// so the controller is back to [`DragState::Idle`] whatever the
    /// outcome. If the list changes, the animation driver is configured,
    /// the reordered list is committed, the crossfade starts at `now` and
    /// the notification is queued to fire one transition duration later.
    ///
    /// Whether anyone listens is checked here only to warn and to apply
    /// [`ReorderPolicy::OnlyIfListener`]. A queued notification goes to
    /// whoever is connected when it fires.
    pub fn release_at(&mut self, index: usize, pointer: Point, now: Instant) -> Result<ReleaseOutcome> {
        self.check_grabbed(index)?;
        let Some(mut session) = self.session.take() else {
            return Err(SortableError::NoActiveSession);
        };
        self.shadow = None;
        let _perf = PerfSpan::new(span_names::RELEASE);

        session.update(pointer);
        let grabbed = session.grabbed();
        let centroid = session.centroid();
        tracing::debug!(target: targets::DRAG, index, ?pointer, ?centroid, "drag released");

        let listening = self.child_index_changed.has_connections();
        if !listening {
            tracing::warn!(
                target: targets::REORDER,
                policy = ?self.config.reorder_policy,
                "no child_index_changed listener connected"
            );
        }

        let hit = hit_test(centroid, grabbed, &self.items, &self.registry);
        if !hit.is_located() {
            tracing::debug!(target: targets::REORDER, index, "no sibling under centroid");
            return Ok(ReleaseOutcome::Unchanged);
        }
        if !listening && self.config.reorder_policy == ReorderPolicy::OnlyIfListener {
            return Ok(ReleaseOutcome::Suppressed);
        }

        let Reorder { list, change } = reorder(mem::take(&mut self.items), grabbed, hit);
        let Some(change) = change else {
            self.items = list;
            return Ok(ReleaseOutcome::Unchanged);
        };

        if let Some(driver) = self.driver.as_mut() {
            driver.configure_next(&self.config.transition);
        }
        self.items = list;
        self.transition.start_at(now, change.old_index, change.new_index);

        let notification = self
            .timers
            .start_one_shot_at(now, self.config.transition.duration);
        self.pending.insert(notification, change);
        tracing::debug!(
            target: targets::REORDER,
            old_index = change.old_index,
            new_index = change.new_index,
            "reorder committed"
        );

        Ok(ReleaseOutcome::Reordered {
            change,
            notification,
        })
    }

    /// Deliver every notification whose transition has finished by `now`.
    ///
    /// Returns the number of changes that fell due, whether or not a
    /// listener was connected to receive them.
    pub fn process_timers_at(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        for id in self.timers.process_expired_at(now) {
            let Some(change) = self.pending.remove(&id) else {
                continue;
            };
            tracing::trace!(
                target: targets::REORDER,
                old_index = change.old_index,
                new_index = change.new_index,
                "delivering child index change"
            );
            self.child_index_changed.emit(change);
            delivered += 1;
        }
        delivered
    }

    /// Drop a queued notification before it fires.
    ///
    /// Fails with [`SortableError::Core`] if the notification was already
    /// delivered, cancelled or discarded.
    pub fn cancel_notification(&mut self, id: TimerId) -> Result<IndexChange> {
        self.timers.stop(id)?;
        let change = self
            .pending
            .remove(&id)
            .ok_or(SortableError::Core(TimerError::InvalidTimerId.into()))?;
        tracing::debug!(
            target: targets::REORDER,
            old_index = change.old_index,
            new_index = change.new_index,
            "notification cancelled"
        );
        Ok(change)
    }

    /// Replace the children with a freshly materialized list.
    ///
    /// Valid in any state: an open drag is cancelled, recorded layouts are
    /// forgotten and the crossfade stops. Pending notifications are kept or
    /// dropped according to [`SortableConfig::pending_on_replace`].
    pub fn replace_children(&mut self, children: impl IntoIterator<Item = T>) {
        if let Some(session) = self.session.take() {
            tracing::debug!(
                target: targets::DRAG,
                index = session.grabbed().index(),
                "drag cancelled by children replacement"
            );
        }
        self.shadow = None;
        self.registry.clear();
        self.items = materialize(children);
        self.transition.stop();

        if self.config.pending_on_replace == PendingPolicy::Discard && !self.pending.is_empty() {
            tracing::debug!(target: targets::REORDER, dropped = self.pending.len(), "pending notifications discarded");
            self.timers.stop_all();
            self.pending.clear();
        }
    }

    fn child(&self, index: usize) -> Result<ChildRef> {
        self.items
            .iter()
            .map(SortableItem::child)
            .find(|child| child.index() == index)
            .ok_or(SortableError::UnknownChild { index })
    }

    fn check_grabbed(&self, index: usize) -> Result<()> {
        let session = self.session.as_ref().ok_or(SortableError::NoActiveSession)?;
        let grabbed = session.grabbed().index();
        if grabbed != index {
            return Err(SortableError::GrabMismatch { grabbed, index });
        }
        Ok(())
    }
}
