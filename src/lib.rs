// SPDX-License-Identifier: MPL-2.0
//! `prompt_gallery` is a desktop gallery of image-generation prompts built
//! with the Iced GUI framework.
//!
//! A bundled catalog of prompts is shown as a filterable card grid. Opening a
//! card shows the full prompt with a copy button and, when the item links to
//! a social post, the embedded post fetched from the provider.

pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod embed;
pub mod error;
pub mod logger;
pub mod media;
pub mod ui;
