// SPDX-License-Identifier: MPL-2.0
//! Collects diagnostic events into the ring buffer.

use crossbeam_channel::{bounded, Receiver, Sender};

use super::{
    AppStateEvent, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    UserAction,
};

/// Pending events allowed in the channel before new ones are dropped.
const CHANNEL_CAPACITY: usize = 100;

/// Cloneable sender into a [`DiagnosticsCollector`].
///
/// All methods are non-blocking; events are dropped when the channel is full
/// or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    pub fn log_action(&self, action: UserAction) {
        self.send(DiagnosticEventKind::UserAction { action });
    }

    pub fn log_state(&self, state: AppStateEvent) {
        self.send(DiagnosticEventKind::AppState { state });
    }

    pub fn log_warning(&self, target: impl Into<String>, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Warning {
            target: target.into(),
            message: message.into(),
        });
    }

    pub fn log_error(&self, target: impl Into<String>, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Error {
            target: target.into(),
            message: message.into(),
        });
    }
}

/// Owns the event buffer. Drain it with [`process_pending`](Self::process_pending)
/// from the UI loop.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(CHANNEL_CAPACITY);
        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves queued events into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Most recent warnings and errors, newest first.
    pub fn recent_problems(&self, limit: usize) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer
            .iter()
            .rev()
            .filter(|event| event.is_problem())
            .take(limit)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DismissSource;

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_action(UserAction::ShowAll);
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn handles_work_across_threads() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        std::thread::spawn(move || handle.log_error("embed", "boom"))
            .join()
            .expect("thread joins");

        collector.process_pending();
        assert!(matches!(
            collector.iter().next().map(|e| &e.kind),
            Some(DiagnosticEventKind::Error { message, .. }) if message == "boom"
        ));
    }

    #[test]
    fn full_channel_drops_events() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        for _ in 0..CHANNEL_CAPACITY + 10 {
            handle.log_state(AppStateEvent::EmbedLibraryReady);
        }
        collector.process_pending();
        assert_eq!(collector.len(), CHANNEL_CAPACITY);
    }

    #[test]
    fn buffer_evicts_beyond_capacity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(16));
        let handle = collector.handle();
        for round in 0..3 {
            for i in 0..10 {
                handle.log_action(UserAction::OpenItem {
                    id: format!("{round}-{i}"),
                });
            }
            collector.process_pending();
        }
        assert_eq!(collector.len(), 16);
    }

    #[test]
    fn recent_problems_are_newest_first() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        handle.log_warning("catalog", "first");
        handle.log_action(UserAction::CloseModal {
            via: DismissSource::Backdrop,
        });
        handle.log_error("embed", "second");
        collector.process_pending();

        let messages: Vec<&str> = collector
            .recent_problems(5)
            .filter_map(|e| match &e.kind {
                DiagnosticEventKind::Warning { message, .. }
                | DiagnosticEventKind::Error { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(messages, vec!["second", "first"]);
    }
}
