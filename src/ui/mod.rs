// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Elm-style "state down, messages up": each component exposes a `Message`
//! enum and reports work it cannot do itself back to the application.
//!
//! - [`gallery`] - Filter bar, card grid and detail modal
//! - [`notifications`] - Toast notifications
//! - [`styles`] - Centralized widget styles
//! - [`design_tokens`] - Colors, spacing and sizing constants
//! - [`theming`] - Light/Dark/System theme mode

pub mod design_tokens;
pub mod gallery;
pub mod notifications;
pub mod styles;
pub mod theming;
