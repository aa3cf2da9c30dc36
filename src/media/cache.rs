// SPDX-License-Identifier: MPL-2.0
//! LRU cache of card thumbnails.

use super::Thumbnail;
use crate::config::defaults::THUMBNAIL_CACHE_CAPACITY;
use lru::LruCache;
use std::num::NonZeroUsize;

#[derive(Debug, Clone)]
pub enum ThumbnailState {
    Loading,
    Ready(Thumbnail),
    /// Fetch or decode failed; the card shows a placeholder.
    Failed,
}

/// Thumbnails keyed by item id.
pub struct ThumbnailCache {
    entries: LruCache<String, ThumbnailState>,
}

impl ThumbnailCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// A cache large enough to hold a thumbnail for every catalog item, so
    /// a loaded image is never evicted by a later fetch.
    #[must_use]
    pub fn for_catalog(item_count: usize) -> Self {
        Self::new(item_count.max(THUMBNAIL_CACHE_CAPACITY))
    }

    /// Marks `id` as loading. Returns `false` if it is already known, so the
    /// caller must not fetch it again.
    pub fn begin(&mut self, id: &str) -> bool {
        if self.entries.contains(id) {
            return false;
        }
        self.entries.put(id.to_string(), ThumbnailState::Loading);
        true
    }

    /// Stores the outcome of a fetch started with [`begin`](Self::begin).
    pub fn finish(&mut self, id: &str, thumbnail: Option<Thumbnail>) {
        let state = match thumbnail {
            Some(thumbnail) => ThumbnailState::Ready(thumbnail),
            None => ThumbnailState::Failed,
        };
        self.entries.put(id.to_string(), state);
    }

    /// Looks up `id` without touching recency.
    #[must_use]
    pub fn peek(&self, id: &str) -> Option<&ThumbnailState> {
        self.entries.peek(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(THUMBNAIL_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ThumbnailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .finish()
    }
}
