//! Applying a hit test to the ordered list.

use sortable_core::logging::targets;

use crate::child::{ChildRef, HasChildRef};
use crate::hit_test::HitTest;

/// A completed move of one item, in list positions.
///
/// This is the payload of the container's `child_index_changed` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexChange {
    /// Position of the moved item before the reorder.
    pub old_index: usize,
    /// Position of the moved item after the reorder.
    pub new_index: usize,
}

impl IndexChange {
    /// Create an index change.
    pub const fn new(old_index: usize, new_index: usize) -> Self {
        Self {
            old_index,
            new_index,
        }
    }
}

/// Result of [`reorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reorder<I> {
    /// The list to display; the input list, untouched, when nothing changed.
    pub list: Vec<I>,
    /// The move that was applied, if any.
    pub change: Option<IndexChange>,
}

impl<I> Reorder<I> {
    fn unchanged(list: Vec<I>) -> Self {
        Self { list, change: None }
    }

    /// Returns true if the list order changed.
    #[inline]
    pub fn changed(&self) -> bool {
        self.change.is_some()
    }
}

/// Move `grabbed` next to the sibling located by `hit`.
///
/// The grabbed item is taken out of the list, keeping the order of the
/// rest, and inserted immediately before or after the sibling as `hit`
/// says. When nothing is located, or the grabbed item would land on its
/// original position, the input list is returned as-is and no change is
/// reported.
pub fn reorder<I: HasChildRef>(mut list: Vec<I>, grabbed: ChildRef, hit: HitTest) -> Reorder<I> {
    let Some(old_index) = list.iter().position(|item| item.child_ref() == grabbed) else {
        return Reorder::unchanged(list);
    };
    let Some(sibling) = hit.sibling().filter(|sibling| *sibling != grabbed) else {
        return Reorder::unchanged(list);
    };

    let item = list.remove(old_index);
    let Some(sibling_pos) = list.iter().position(|item| item.child_ref() == sibling) else {
        list.insert(old_index, item);
        return Reorder::unchanged(list);
    };

    let new_index = match hit {
        HitTest::Before(_) => sibling_pos,
        _ => sibling_pos + 1,
    };
    list.insert(new_index, item);

    if new_index == old_index {
        // Removing and reinserting at the same position restored the input.
        tracing::debug!(target: targets::REORDER, index = grabbed.index(), old_index, "reorder lands on original position, treated as unchanged");
        return Reorder::unchanged(list);
    }

    tracing::debug!(target: targets::REORDER, index = grabbed.index(), old_index, new_index, "reordered");
    Reorder {
        list,
        change: Some(IndexChange::new(old_index, new_index)),
    }
}
