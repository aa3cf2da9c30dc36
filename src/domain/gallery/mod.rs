// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.
//!
//! This module contains the prompt catalog entry and the pure filter engine
//! used by the grid. Nothing here performs I/O.

pub mod filter;
pub mod item;

pub use filter::{
    distinct_categories, distinct_tags, visible_items, FilterCache, FilterMode, FilterSelection,
};
pub use item::{card_excerpt, PromptItem, CARD_ELLIPSIS};
