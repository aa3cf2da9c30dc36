// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Gallery**: Card layout and prompt truncation
//! - **Embed**: Embedded post loading and polling
//! - **Images**: Card thumbnail decoding and caching
//! - **Diagnostics**: Event buffer bounds

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Number of characters of a prompt shown on a grid card before the ellipsis.
pub const DEFAULT_CARD_PROMPT_CHARS: usize = 120;

/// Minimum card prompt length (anything shorter is unreadable).
pub const MIN_CARD_PROMPT_CHARS: usize = 20;

/// Maximum card prompt length.
pub const MAX_CARD_PROMPT_CHARS: usize = 500;

/// Default number of grid columns.
pub const DEFAULT_GRID_COLUMNS: u16 = 3;

/// Minimum number of grid columns.
pub const MIN_GRID_COLUMNS: u16 = 1;

/// Maximum number of grid columns.
pub const MAX_GRID_COLUMNS: u16 = 8;

// ==========================================================================
// Embed Defaults
// ==========================================================================

/// oEmbed endpoint of the post provider.
pub const DEFAULT_EMBED_ENDPOINT: &str = "https://publish.twitter.com/oembed";

/// Delay between two readiness checks while waiting for the embed library.
pub const DEFAULT_EMBED_POLL_INTERVAL_MS: u64 = 300;

/// Lower bound of the readiness poll interval.
pub const MIN_EMBED_POLL_INTERVAL_MS: u64 = 100;

/// Upper bound of the readiness poll interval.
pub const MAX_EMBED_POLL_INTERVAL_MS: u64 = 1000;

/// HTTP timeout for a single embed request.
pub const EMBED_REQUEST_TIMEOUT_SECS: u64 = 15;

// ==========================================================================
// Image Defaults
// ==========================================================================

/// Longest edge of a decoded card thumbnail, in pixels.
pub const THUMBNAIL_MAX_EDGE_PX: u32 = 512;

/// Number of decoded thumbnails kept in memory.
pub const THUMBNAIL_CACHE_CAPACITY: usize = 256;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_prompt_default_within_bounds() {
        assert!(DEFAULT_CARD_PROMPT_CHARS >= MIN_CARD_PROMPT_CHARS);
        assert!(DEFAULT_CARD_PROMPT_CHARS <= MAX_CARD_PROMPT_CHARS);
    }

    #[test]
    fn poll_interval_default_within_bounds() {
        assert!(DEFAULT_EMBED_POLL_INTERVAL_MS >= MIN_EMBED_POLL_INTERVAL_MS);
        assert!(DEFAULT_EMBED_POLL_INTERVAL_MS <= MAX_EMBED_POLL_INTERVAL_MS);
    }

    #[test]
    fn grid_columns_default_within_bounds() {
        assert!(DEFAULT_GRID_COLUMNS >= MIN_GRID_COLUMNS);
        assert!(DEFAULT_GRID_COLUMNS <= MAX_GRID_COLUMNS);
    }
}
