//! Error types for the sortable container.
//!
//! Every error here is non-fatal. An operation that returns an error has not
//! changed any state; the handler-table entry points log these at `debug`
//! and drop them, so a gesture that cannot be resolved degrades to a no-op.

use sortable_core::CoreError;

/// Result type alias for sortable operations.
pub type Result<T> = std::result::Result<T, SortableError>;

/// Errors that can occur while handling container events.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SortableError {
    /// A press referenced a child that has not reported its layout yet.
    #[error("No layout recorded for child {index}")]
    MissingLayout { index: usize },

    /// A move or release arrived while no drag was in progress.
    #[error("No active drag session")]
    NoActiveSession,

    /// A press arrived while another child is already grabbed.
    #[error("Child {grabbed} is already being dragged")]
    SessionActive { grabbed: usize },

    /// The index does not belong to the current list.
    #[error("Child {index} is not part of the current list")]
    UnknownChild { index: usize },

    /// A move or release was delivered for a child other than the grabbed one.
    #[error("Event for child {index} while child {grabbed} is grabbed")]
    GrabMismatch { grabbed: usize, index: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Signal or timer bookkeeping failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SortableError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
