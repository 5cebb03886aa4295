//! Per-child layout bookkeeping.

use std::collections::HashMap;

use sortable_core::logging::targets;

use crate::child::ChildRef;
use crate::geometry::Rect;

/// The last bounding box each child reported.
///
/// Entries are overwritten unconditionally and never pruned implicitly;
/// [`clear`](Self::clear) runs when the children are replaced.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    layouts: HashMap<ChildRef, Rect>,
}

impl LayoutRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the bounding box reported by `child`.
    ///
    /// Values are stored as given, including negative sizes.
    pub fn record(&mut self, child: ChildRef, rect: Rect) {
        tracing::trace!(target: targets::LAYOUT, index = child.index(), ?rect, "layout recorded");
        self.layouts.insert(child, rect);
    }

    /// The last bounding box reported by `child`.
    pub fn get(&self, child: ChildRef) -> Option<Rect> {
        self.layouts.get(&child).copied()
    }

    /// Returns true if `child` has reported a layout.
    pub fn contains(&self, child: ChildRef) -> bool {
        self.layouts.contains_key(&child)
    }

    /// Forget every recorded layout.
    pub fn clear(&mut self) {
        self.layouts.clear();
    }

    /// Number of children with a recorded layout.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Returns true if no layout has been recorded.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
