//! Signal/slot system for Sortable.
//!
//! This module provides a type-safe, Qt-inspired signal/slot mechanism used
//! to notify hosts of changes. Signals are emitted by a component when its
//! state changes, and connected slots (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Reentrancy
//!
//! Slots are invoked on the emitting thread, in connection order. The
//! connection table is snapshotted before any slot runs, so a slot may
//! connect or disconnect slots on the same signal; such changes take effect
//! from the next emission.
//!
//! # Example
//!
//! ```
//! use sortable_core::Signal;
//!
//! // (old position, new position) of a moved row.
//! let row_moved = Signal::<(usize, usize)>::new();
//!
//! let conn_id = row_moved.connect(|&(from, to)| {
//!     println!("row {from} is now at {to}");
//! });
//!
//! assert_eq!(row_moved.emit((0, 2)), 1);
//! row_moved.disconnect(conn_id);
//! assert_eq!(row_moved.emit((2, 0)), 0);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SignalError};
use crate::logging::{span_names, targets};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with the
/// provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a struct/tuple for multiple values.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use sortable_core::Signal;
    ///
    /// let selection = Signal::<usize>::new();
    /// let id = selection.connect(|index| println!("selected row {index}"));
    /// selection.emit(3);
    /// assert!(selection.disconnect(id));
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connections.lock().insert(Arc::new(slot));
        crate::sortable_trace!(?id, "slot connected");
        id
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect a specific slot, reporting unknown IDs as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<()> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection.into())
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Returns true if at least one slot is connected.
    pub fn has_connections(&self) -> bool {
        !self.connections.lock().is_empty()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// Returns the number of slots invoked (0 when blocked).
    pub fn emit(&self, args: Args) -> usize {
        let _span = tracing::trace_span!(target: targets::SIGNAL, span_names::SIGNAL).entered();
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return 0;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`]. The guard borrows the signal, so
/// the borrow checker guarantees the signal outlives it.
///
/// # Example
///
/// ```
/// use sortable_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
#[derive(Debug)]
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    type Moves = Arc<Mutex<Vec<(usize, usize)>>>;

    fn recorder(signal: &Signal<(usize, usize)>) -> (Moves, ConnectionId) {
        let moves: Moves = Arc::new(Mutex::new(Vec::new()));
        let sink = moves.clone();
        let id = signal.connect(move |&pair| sink.lock().push(pair));
        (moves, id)
    }

    #[test]
    fn test_emit_reaches_slot_in_order() {
        let signal = Signal::new();
        let (moves, _) = recorder(&signal);

        assert_eq!(signal.emit((0, 2)), 1);
        signal.emit((3, 1));

        assert_eq!(*moves.lock(), vec![(0, 2), (3, 1)]);
    }

    #[test]
    fn test_disconnected_slot_stops_receiving() {
        let signal = Signal::new();
        let (moves, id) = recorder(&signal);

        signal.emit((1, 0));
        assert!(signal.disconnect(id));
        assert_eq!(signal.emit((0, 1)), 0);

        assert_eq!(*moves.lock(), vec![(1, 0)]);
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_try_disconnect_unknown() {
        let signal = Signal::<()>::new();
        let id = signal.connect(|_| {});
        assert!(signal.try_disconnect(id).is_ok());
        assert_eq!(
            signal.try_disconnect(id),
            Err(CoreError::Signal(SignalError::InvalidConnection))
        );
    }

    #[test]
    fn test_blocking_skips_emission() {
        let signal = Signal::new();
        let (moves, _) = recorder(&signal);

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        assert_eq!(signal.emit((0, 1)), 0);
        signal.set_blocked(false);
        signal.emit((1, 2));

        assert_eq!(*moves.lock(), vec![(1, 2)]);
        // Blocking does not disconnect anything.
        assert!(signal.has_connections());
    }

    #[test]
    fn test_every_listener_is_called() {
        let signal = Signal::new();
        let first = recorder(&signal).0;
        let second = recorder(&signal).0;

        assert_eq!(signal.connection_count(), 2);
        assert_eq!(signal.emit((4, 0)), 2);
        assert_eq!(*first.lock(), *second.lock());
    }

    #[test]
    fn test_disconnect_all_clears_listeners() {
        let signal = Signal::<(usize, usize)>::new();
        recorder(&signal);
        recorder(&signal);

        signal.disconnect_all();
        assert!(!signal.has_connections());
        assert_eq!(signal.emit((0, 1)), 0);
    }

    #[test]
    fn test_scoped_connection_ends_with_guard() {
        let signal = Signal::<(usize, usize)>::new();
        let moves: Moves = Arc::new(Mutex::new(Vec::new()));

        {
            let sink = moves.clone();
            let _guard = signal.connect_scoped(move |&pair| sink.lock().push(pair));
            assert_eq!(signal.connection_count(), 1);
            signal.emit((2, 0));
        }

        signal.emit((0, 2));
        assert_eq!(*moves.lock(), vec![(2, 0)]);
        assert!(!signal.has_connections());
    }

    #[test]
    fn test_slot_can_disconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(Mutex::new(0));

        let id_cell: Arc<Mutex<Option<ConnectionId>>> = Arc::new(Mutex::new(None));
        let weak = Arc::downgrade(&signal);
        let id_for_slot = id_cell.clone();
        let calls_clone = calls.clone();
        let id = signal.connect(move |_| {
            *calls_clone.lock() += 1;
            if let (Some(signal), Some(id)) = (weak.upgrade(), *id_for_slot.lock()) {
                signal.disconnect(id);
            }
        });
        *id_cell.lock() = Some(id);

        signal.emit(());
        signal.emit(());

        assert_eq!(*calls.lock(), 1);
    }
}
