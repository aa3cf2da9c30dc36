// SPDX-License-Identifier: MPL-2.0
//! Copying text to the system clipboard.
//!
//! Direct access through `arboard` is tried first. When it is unavailable or
//! fails, the caller gets the text back in [`CopyPlan::Fallback`] and hands it
//! to the window runtime's clipboard instead.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Direct clipboard access is not possible in this session.
    Unavailable(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "clipboard unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::Unavailable(err.to_string())
    }
}

/// Something that can receive text directly.
pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard.
///
/// The `arboard` handle is opened on first use and then kept: on X11 the
/// copied text only lives as long as the handle.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        clipboard.set_text(text)?;
        // Dropped on failure, so the next attempt reopens it.
        self.inner = Some(clipboard);
        Ok(())
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

/// What is left to do after trying the direct path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyPlan {
    Copied,
    /// Direct access failed; write this text through the fallback path.
    Fallback(String),
}

/// Copies `text` through `backend`, or plans the fallback.
pub fn copy_text(backend: &mut (impl ClipboardBackend + ?Sized), text: &str) -> CopyPlan {
    match backend.set_text(text) {
        Ok(()) => CopyPlan::Copied,
        Err(err) => {
            log::debug!("direct clipboard write failed, using fallback: {}", err);
            CopyPlan::Fallback(text.to_string())
        }
    }
}
