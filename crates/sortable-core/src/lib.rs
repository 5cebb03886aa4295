//! Core plumbing for Sortable.
//!
//! This crate provides the pieces the sortable container is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification for hosts
//! - **Timers**: A one-shot timer queue driven by an injected clock
//! - **Logging**: `tracing` targets, span names and convenience macros
//!
//! Everything here is single-threaded in spirit: handlers are invoked by an
//! external event source one at a time, and the timer queue only advances
//! when the host asks it to.
//!
//! # Signal/Slot Example
//!
//! ```
//! use sortable_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use sortable_core::TimerManager;
//! use std::time::{Duration, Instant};
//!
//! let mut timers = TimerManager::new();
//! let start = Instant::now();
//! let id = timers.start_one_shot_at(start, Duration::from_millis(192));
//!
//! assert!(timers.process_expired_at(start).is_empty());
//! assert_eq!(timers.process_expired_at(start + Duration::from_millis(192)), vec![id]);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, SignalError, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
