// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::embed::Readiness;
use crate::error::Error;
use crate::media::Thumbnail;
use crate::ui::gallery;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. Component messages are
/// forwarded through their own variant.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Notification(notifications::NotificationMessage),
    /// The one-time embed library load finished.
    EmbedLibraryLoaded(Readiness),
    ThumbnailLoaded {
        id: String,
        result: Result<Thumbnail, Error>,
    },
    /// Outcome of the runtime clipboard write used as a copy fallback.
    ClipboardFallbackDone,
    /// Periodic tick for notification expiry and diagnostics draining.
    Tick(Instant),
    EscapePressed,
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Catalog file replacing the bundled data.
    pub data_path: Option<PathBuf>,
    /// Config directory override (for settings.toml).
    /// Takes precedence over `PROMPT_GALLERY_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Theme override for this run; not persisted.
    pub theme: Option<ThemeMode>,
}
