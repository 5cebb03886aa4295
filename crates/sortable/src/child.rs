//! Child identity and materialization.
//!
//! The host hands the container a collection of child contents. The
//! container wraps each one in a [`SortableItem`] carrying a [`ChildRef`]
//! whose index is the child's position at materialization time. That index
//! is the identity used by layout reports, gestures and the registry; list
//! order is tracked separately by the position of the item in the list.

/// Identity of one child within a materialized list.
///
/// Indices are dense (`0..n`) and unique within one materialization. They
/// are reassigned from scratch whenever the host replaces the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildRef {
    index: usize,
}

impl ChildRef {
    /// Create a reference for the child materialized at `index`.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// The materialization index.
    #[inline]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Anything that carries a [`ChildRef`].
///
/// The reorder engine is written against this trait so it can reorder bare
/// references as well as full items.
pub trait HasChildRef {
    /// The identity of this element.
    fn child_ref(&self) -> ChildRef;
}

impl HasChildRef for ChildRef {
    fn child_ref(&self) -> ChildRef {
        *self
    }
}

/// A child content wrapped with its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct SortableItem<T> {
    child: ChildRef,
    content: T,
}

impl<T> SortableItem<T> {
    /// Wrap `content` with the given identity.
    pub fn new(child: ChildRef, content: T) -> Self {
        Self { child, content }
    }

    /// The identity of this item.
    #[inline]
    pub fn child(&self) -> ChildRef {
        self.child
    }

    /// The materialization index of this item.
    #[inline]
    pub fn index(&self) -> usize {
        self.child.index()
    }

    /// The wrapped content.
    #[inline]
    pub fn content(&self) -> &T {
        &self.content
    }

    /// Mutable access to the wrapped content.
    #[inline]
    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    /// Unwrap the content.
    pub fn into_content(self) -> T {
        self.content
    }
}

impl<T> HasChildRef for SortableItem<T> {
    fn child_ref(&self) -> ChildRef {
        self.child
    }
}

/// Wrap the host's children, assigning indices `0..n` in iteration order.
///
/// Zero, one or many children are all accepted: pass an empty iterator, an
/// `Option<T>` or `std::iter::once(child)`, or any collection.
///
/// ```
/// use sortable::materialize;
///
/// assert!(materialize(None::<&str>).is_empty());
/// assert_eq!(materialize(Some("only"))[0].index(), 0);
///
/// let items = materialize(["a", "b", "c"]);
/// let indices: Vec<usize> = items.iter().map(|item| item.index()).collect();
/// assert_eq!(indices, vec![0, 1, 2]);
/// ```
pub fn materialize<T>(children: impl IntoIterator<Item = T>) -> Vec<SortableItem<T>> {
    children
        .into_iter()
        .enumerate()
        .map(|(index, content)| SortableItem::new(ChildRef::new(index), content))
        .collect()
}
