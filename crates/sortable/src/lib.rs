//! Sortable - a drag-to-reorder list container.
//!
//! The container lets a user press any child, drag a floating shadow of it
//! over its siblings and drop it into a new position. Rendering, gesture
//! delivery and animation are left to the host; the container consumes
//! them through narrow seams:
//!
//! - Items report layouts and gestures through the [`ItemEvents`] handler
//!   table implemented by [`Sortable`].
//! - The host animates layout changes through an [`AnimationDriver`].
//! - The host learns about new orders through the `child_index_changed`
//!   signal, which fires once the crossfade that follows a reorder has
//!   finished.
//!
//! # Example
//!
//! ```
//! use sortable::{ItemEvents, Point, Rect, Sortable};
//!
//! let mut list = Sortable::new(vec!["apples", "pears", "plums"]);
//! list.connect_child_index_changed(|change| {
//!     println!("moved {} -> {}", change.old_index, change.new_index);
//! });
//!
//! for index in 0..3 {
//!     list.on_layout(index, Rect::new(0.0, 40.0 * index as f32, 200.0, 40.0));
//! }
//!
//! // Drag "plums" up onto "apples".
//! list.on_grant(2, Point::new(100.0, 100.0));
//! list.on_move(2, Point::new(100.0, 20.0));
//! list.on_release(2, Point::new(100.0, 20.0));
//!
//! let order: Vec<&str> = list.items().iter().map(|item| *item.content()).collect();
//! assert_eq!(order, vec!["plums", "apples", "pears"]);
//! ```

pub mod animation;
mod child;
mod config;
mod container;
mod controller;
mod error;
mod geometry;
mod handlers;
mod registry;
mod reorder;
mod session;

pub use animation::{AnimatedProperty, AnimationDriver, Easing, LayoutAnimation};
pub use child::{ChildRef, HasChildRef, SortableItem, materialize};
pub use config::{PendingPolicy, ReorderPolicy, SortableConfig};
pub use container::{ShadowView, Sortable, SortableView};
pub use controller::{DragController, DragState, ReleaseOutcome};
pub use error::{Result, SortableError};
pub use geometry::{Point, Rect, Size};
pub use handlers::{ItemEvent, ItemEvents, ItemObserver};
pub use hit_test::{HitTest, hit_test};
pub use registry::LayoutRegistry;
pub use reorder::{IndexChange, Reorder, reorder};
pub use session::{DragSession, PointerEvents, ShadowProxy};

pub use sortable_core::{ConnectionGuard, ConnectionId, Signal, TimerId};
