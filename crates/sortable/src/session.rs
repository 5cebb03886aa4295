//! Drag session state and the shadow proxy that follows the pointer.

use crate::child::ChildRef;
use crate::geometry::{Point, Rect};

/// State of the one drag that may be in progress.
///
/// Created on grant and dropped on release or when the children are
/// replaced. While alive it is the only source of the shadow position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    grabbed: ChildRef,
    origin_rect: Rect,
    origin_pointer: Point,
    current_pointer: Point,
}

impl DragSession {
    /// Open a session for `grabbed`, whose layout was `origin_rect` when the
    /// pointer went down at `origin_pointer`.
    pub fn new(grabbed: ChildRef, origin_rect: Rect, origin_pointer: Point) -> Self {
        Self {
            grabbed,
            origin_rect,
            origin_pointer,
            current_pointer: origin_pointer,
        }
    }

    /// The grabbed child.
    #[inline]
    pub fn grabbed(&self) -> ChildRef {
        self.grabbed
    }

    /// The grabbed child's layout at grant time.
    #[inline]
    pub fn origin_rect(&self) -> Rect {
        self.origin_rect
    }

    /// Pointer position at grant time.
    #[inline]
    pub fn origin_pointer(&self) -> Point {
        self.origin_pointer
    }

    /// Last pointer position seen.
    #[inline]
    pub fn current_pointer(&self) -> Point {
        self.current_pointer
    }

    /// Record a new pointer position and return the resulting shadow box.
    pub fn update(&mut self, pointer: Point) -> Rect {
        self.current_pointer = pointer;
        self.shadow_rect()
    }

    /// The origin box translated by the pointer's offset since grant.
    pub fn shadow_rect(&self) -> Rect {
        self.shadow_rect_for(self.current_pointer)
    }

    /// The shadow box the session would have with the pointer at `pointer`.
    pub fn shadow_rect_for(&self, pointer: Point) -> Rect {
        self.origin_rect.translate(pointer.offset_from(self.origin_pointer))
    }

    /// Center of the current shadow box, the point used for hit testing.
    pub fn centroid(&self) -> Point {
        self.shadow_rect().center()
    }
}

/// Whether an element takes part in pointer hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerEvents {
    /// The element receives pointer events.
    #[default]
    Auto,
    /// The element is transparent to pointer events.
    None,
}

/// The floating duplicate of the grabbed child.
///
/// Rendered on top of the list, with zero margin, at [`rect`](Self::rect).
/// It never receives pointer events; the grabbed child underneath keeps
/// receiving them for the rest of the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowProxy {
    source: ChildRef,
    rect: Rect,
}

impl ShadowProxy {
    /// Create a proxy for `source` positioned at `rect`.
    pub fn new(source: ChildRef, rect: Rect) -> Self {
        Self { source, rect }
    }

    /// The child this proxy duplicates.
    #[inline]
    pub fn source(&self) -> ChildRef {
        self.source
    }

    /// Where the proxy is drawn.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Always [`PointerEvents::None`].
    #[inline]
    pub fn pointer_events(&self) -> PointerEvents {
        PointerEvents::None
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}
