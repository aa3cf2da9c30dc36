// SPDX-License-Identifier: MPL-2.0
//! In-memory activity log.
//!
//! User actions, state changes, and every warning or error logged through the
//! `log` facade are kept in a bounded ring buffer so recent activity can be
//! inspected after a failure.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Ring buffer evicting the oldest entries
//! - [`DiagnosticEvent`]: Timestamped event
//! - [`DiagnosticsCollector`]: Owns the buffer, drained from the UI loop
//! - [`DiagnosticsHandle`]: Cloneable, thread-safe sender into the collector

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{AppStateEvent, DiagnosticEvent, DiagnosticEventKind, DismissSource, UserAction};
