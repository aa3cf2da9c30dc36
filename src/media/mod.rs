// SPDX-License-Identifier: MPL-2.0
//! Card images.
//!
//! Images are fetched over HTTP or read from disk, downscaled to thumbnails
//! off the UI thread, and kept in an LRU cache keyed by item id.

mod cache;
mod thumbnail;

pub use cache::{ThumbnailCache, ThumbnailState};
pub use thumbnail::{decode_thumbnail, ImageSource, Thumbnail, ThumbnailLoader};
