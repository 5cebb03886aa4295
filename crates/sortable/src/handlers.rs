//! The handler table shared by every item of a sortable list.
//!
//! Instead of wiring callbacks into each child, items forward their layout
//! and gesture events to one [`ItemEvents`] implementation (the container),
//! tagged with their materialization index. Hosts that also want to see
//! those events install an [`ItemObserver`].

use crate::geometry::{Point, Rect};

/// One event reported by an item.
///
/// Pointer coordinates are page-relative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEvent {
    /// The item was measured.
    Layout { index: usize, rect: Rect },
    /// The item became the gesture responder.
    Grant { index: usize, pointer: Point },
    /// The pointer moved during the gesture.
    Move { index: usize, pointer: Point },
    /// The pointer was lifted.
    Release { index: usize, pointer: Point },
}

impl ItemEvent {
    /// The index of the reporting item.
    pub fn index(&self) -> usize {
        match *self {
            ItemEvent::Layout { index, .. }
            | ItemEvent::Grant { index, .. }
            | ItemEvent::Move { index, .. }
            | ItemEvent::Release { index, .. } => index,
        }
    }
}

/// Receives layout and gesture events from items.
///
/// Implementations never fail: an event that cannot be applied is dropped.
pub trait ItemEvents {
    /// The item at `index` reported its bounding box.
    fn on_layout(&mut self, index: usize, rect: Rect);

    /// Whether the item at `index` should become the gesture responder.
    fn should_become_responder(&self, index: usize) -> bool;

    /// The item at `index` was pressed at `pointer`.
    fn on_grant(&mut self, index: usize, pointer: Point);

    /// The pointer moved to `pointer` while the item at `index` is pressed.
    fn on_move(&mut self, index: usize, pointer: Point);

    /// The pointer was lifted at `pointer`.
    fn on_release(&mut self, index: usize, pointer: Point);

    /// Route `event` to the matching handler.
    fn dispatch(&mut self, event: ItemEvent) {
        match event {
            ItemEvent::Layout { index, rect } => self.on_layout(index, rect),
            ItemEvent::Grant { index, pointer } => self.on_grant(index, pointer),
            ItemEvent::Move { index, pointer } => self.on_move(index, pointer),
            ItemEvent::Release { index, pointer } => self.on_release(index, pointer),
        }
    }
}

/// Host hooks called after the container has handled an item event.
///
/// Every method defaults to doing nothing.
pub trait ItemObserver {
    /// Called after a layout report was recorded (or dropped).
    fn on_layout(&mut self, _index: usize, _rect: Rect) {}

    /// Called after a press was handled.
    fn on_grant(&mut self, _index: usize, _pointer: Point) {}

    /// Called after a move was handled.
    fn on_move(&mut self, _index: usize, _pointer: Point) {}

    /// Called after a release was handled.
    fn on_release(&mut self, _index: usize, _pointer: Point) {}
}
