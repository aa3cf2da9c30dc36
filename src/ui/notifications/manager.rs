// SPDX-License-Identifier: MPL-2.0
//! Notification queue and expiry.

use super::notification::{Notification, NotificationId, Severity};
use crate::diagnostics::DiagnosticsHandle;
use std::collections::VecDeque;
use std::time::Instant;

const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

/// Visible toasts (newest first) plus an overflow queue.
#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings and errors pushed after this are also recorded as diagnostics.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    pub fn push(&mut self, notification: Notification) {
        if let Some(handle) = &self.diagnostics {
            match notification.severity() {
                Severity::Warning => {
                    handle.log_warning(notification.source(), notification.message());
                }
                Severity::Error => {
                    handle.log_error(notification.source(), notification.message());
                }
                Severity::Success | Severity::Info => {}
            }
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Returns `true` if the notification was found.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Drops expired toasts.
    pub fn tick(&mut self, now: Instant) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.is_expired(now));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(Instant::now()),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            match self.queue.pop_front() {
                Some(notification) => self.visible.push_back(notification),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector};
    use std::time::Duration;

    #[test]
    fn overflow_is_queued() {
        let mut manager = Manager::new();
        for i in 0..MAX_VISIBLE + 1 {
            manager.push(Notification::info(format!("n{i}")));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
    }

    #[test]
    fn dismiss_promotes_from_queue() {
        let mut manager = Manager::new();
        let first = Notification::info("first");
        let first_id = first.id();
        manager.push(first);
        for i in 0..MAX_VISIBLE {
            manager.push(Notification::info(format!("n{i}")));
        }

        assert!(manager.dismiss(first_id));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
        assert!(!manager.dismiss(first_id));
    }

    #[test]
    fn tick_expires_only_timed_toasts() {
        let mut manager = Manager::new();
        manager.push(Notification::success("copied"));
        manager.push(Notification::error("broken"));

        manager.tick(Instant::now() + Duration::from_secs(10));

        assert_eq!(manager.visible_count(), 1);
        assert_eq!(
            manager.visible().next().map(Notification::severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn warnings_and_errors_reach_diagnostics() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let mut manager = Manager::new();
        manager.set_diagnostics(collector.handle());

        manager.push(Notification::success("ok"));
        manager.push(Notification::warning("slow").from_source("embed"));
        manager.push(Notification::error("fail"));
        collector.process_pending();

        assert_eq!(collector.len(), 2);
        let first = collector.iter().next().map(|e| e.kind.clone());
        assert!(matches!(
            first,
            Some(DiagnosticEventKind::Warning { target, .. }) if target == "embed"
        ));
    }
}
