//! Core systems for Cardstack.
//!
//! This crate provides the foundational notification primitive used across
//! the Cardstack widget crates:
//!
//! - **Signal/Slot System**: Type-safe observer notifications
//!
//! # Signal/Slot Example
//!
//! ```
//! use cardstack_core::Signal;
//!
//! // Create a signal that notifies when a card index changes
//! let index_changed = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = index_changed.connect(|index| {
//!     println!("Index changed to: {}", index);
//! });
//!
//! // Emit the signal
//! index_changed.emit(42);
//!
//! // Disconnect when done
//! index_changed.disconnect(conn_id);
//! ```

mod signal;

pub use signal::{ConnectionId, Signal};
