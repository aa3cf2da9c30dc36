// SPDX-License-Identifier: MPL-2.0
//! Event and timer subscriptions.

use super::Message;
use crate::ui::gallery;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, Subscription};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Escape (modal dismissal) and window close requests.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(iced::window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            ..
        }) if status == event::Status::Ignored => Some(Message::EscapePressed),
        _ => None,
    })
}

/// Readiness poll for the embed library. Runs only while the open modal's
/// renderer is waiting, so closing the modal stops it.
pub fn create_embed_poll_subscription(awaiting: bool, interval: Duration) -> Subscription<Message> {
    if awaiting {
        time::every(interval).map(|_| Message::Gallery(gallery::Message::EmbedTick))
    } else {
        Subscription::none()
    }
}

/// Periodic tick for notification auto-dismiss and diagnostics draining.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
