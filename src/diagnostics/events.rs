// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How the modal was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissSource {
    CloseButton,
    Backdrop,
    EscapeKey,
}

/// User-initiated actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    /// `None` clears the category filter.
    SelectCategory { category: Option<String> },
    SelectTag { tag: Option<String> },
    ShowAll,
    OpenItem { id: String },
    CloseModal { via: DismissSource },
    CopyPrompt { id: String },
    OpenPostLink,
}

/// Application state changes worth keeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    CatalogLoaded { items: usize },
    EmbedLibraryReady,
    EmbedRendered { post_id: String },
    EmbedFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction { action: UserAction },
    AppState { state: AppStateEvent },
    /// A warning record from the `log` facade or a warning toast.
    Warning { target: String, message: String },
    Error { target: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }

    #[must_use]
    pub fn is_problem(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticEventKind::Warning { .. } | DiagnosticEventKind::Error { .. }
        )
    }
}
