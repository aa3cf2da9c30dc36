// SPDX-License-Identifier: MPL-2.0
//! Embedded social posts.
//!
//! The embed capability is provided by an external library that becomes
//! available asynchronously. This module defines the adapter the rest of the
//! application talks to, so the renderer never depends on the provider's
//! actual wire format.
//!
//! # Architecture
//!
//! - [`EmbedLibrary`]: Adapter over the provider (render markup, create one embed)
//! - [`EmbedLoader`]: Loads the library once per process and exposes readiness
//! - [`TweetRenderer`]: Per-modal state machine that waits for the library,
//!   renders one post into a [`MountPoint`], and falls back to a link
//! - [`oembed`]: The production adapter backed by the provider's oEmbed API

pub mod loader;
pub mod mount;
pub mod oembed;
pub mod renderer;

pub use loader::{EmbedLoader, EmbedScript, Readiness};
pub use mount::{MountNode, MountPoint, Notice, FALLBACK_LINK_LABEL};
pub use renderer::{EmbedRequest, RenderFailure, RenderState, SessionId, TweetRenderer};

use futures_util::future::BoxFuture;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static POST_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"status/(\d+)").expect("post id pattern is valid"));

/// Extracts the numeric post id from a post URL (`.../status/<digits>`).
///
/// ```
/// use prompt_gallery::embed::extract_post_id;
///
/// assert_eq!(extract_post_id("https://x.com/user/status/1234567890"), Some("1234567890"));
/// assert_eq!(extract_post_id("https://x.com/user"), None);
/// ```
#[must_use]
pub fn extract_post_id(url: &str) -> Option<&str> {
    POST_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// =============================================================================
// Options
// =============================================================================

/// Visual theme requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedTheme {
    Light,
    #[default]
    Dark,
}

impl EmbedTheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EmbedTheme::Light => "light",
            EmbedTheme::Dark => "dark",
        }
    }
}

/// Horizontal alignment requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl EmbedAlign {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EmbedAlign::Left => "left",
            EmbedAlign::Center => "center",
            EmbedAlign::Right => "right",
        }
    }
}

/// Options passed with every embed creation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmbedOptions {
    pub theme: EmbedTheme,
    pub align: EmbedAlign,
    /// Do-not-track flag.
    pub dnt: bool,
}

// =============================================================================
// Rendered Post
// =============================================================================

/// An embedded post as produced by the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPost {
    pub post_id: String,
    pub author_name: String,
    /// Account handle without the leading `@`.
    pub author_handle: Option<String>,
    /// Post body, one entry per paragraph.
    pub paragraphs: Vec<String>,
    /// Human-readable publication date as given by the provider.
    pub date: Option<String>,
    pub permalink: String,
}

// =============================================================================
// Errors
// =============================================================================

/// Failures of the embed pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    /// No post id could be derived from the URL.
    Extraction(String),
    /// The embed library is not loaded (or failed to load).
    LibraryUnavailable(String),
    /// The library rejected the embed request.
    Render(String),
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::Extraction(url) => write!(f, "no post id in {}", url),
            EmbedError::LibraryUnavailable(msg) => write!(f, "embed library unavailable: {}", msg),
            EmbedError::Render(msg) => write!(f, "embed rendering failed: {}", msg),
        }
    }
}

impl std::error::Error for EmbedError {}

// =============================================================================
// Library Adapter
// =============================================================================

/// Result of a single embed creation: `Ok(None)` is an empty result.
pub type EmbedResult = Result<Option<EmbeddedPost>, EmbedError>;

/// Adapter over the external embed capability.
pub trait EmbedLibrary: Send + Sync + fmt::Debug {
    /// Creates the embed for one post.
    ///
    /// Resolves to `Ok(None)` when the provider returns nothing for the id
    /// (deleted or protected post).
    fn create_embed(&self, post_id: &str, options: &EmbedOptions) -> BoxFuture<'static, EmbedResult>;

    /// Renders every pending embed placeholder under `root` in place.
    ///
    /// Placeholders that fail to render are replaced by a fallback link.
    /// Returns the number of posts rendered.
    fn render_all<'a>(
        &'a self,
        root: &'a mut MountPoint,
        options: &'a EmbedOptions,
    ) -> BoxFuture<'a, usize> {
        Box::pin(async move {
            let mut rendered = 0;
            for node in root.nodes_mut() {
                let MountNode::Pending { post_id } = node else {
                    continue;
                };
                let permalink = mount::permalink_for(post_id);
                *node = match self.create_embed(post_id, options).await {
                    Ok(Some(post)) => {
                        rendered += 1;
                        MountNode::Post(post)
                    }
                    Ok(None) => MountNode::FallbackLink { url: permalink },
                    Err(err) => {
                        log::warn!("render_all: {}", err);
                        MountNode::FallbackLink { url: permalink }
                    }
                };
            }
            rendered
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{Answer, FakeLibrary};
    use super::*;

    #[test]
    fn extracts_id_from_status_url() {
        assert_eq!(
            extract_post_id("https://x.com/user/status/1234567890"),
            Some("1234567890")
        );
    }

    #[test]
    fn extracts_id_ignoring_query_and_suffix() {
        assert_eq!(
            extract_post_id("https://twitter.com/a/status/42?s=20&t=abc"),
            Some("42")
        );
        assert_eq!(
            extract_post_id("https://x.com/a/status/42/photo/1"),
            Some("42")
        );
    }

    #[test]
    fn urls_without_status_digits_have_no_id() {
        assert_eq!(extract_post_id("https://x.com/user"), None);
        assert_eq!(extract_post_id("https://x.com/user/status/"), None);
        assert_eq!(extract_post_id("https://x.com/user/status/abc"), None);
        assert_eq!(extract_post_id(""), None);
    }

    #[test]
    fn option_names_match_provider_vocabulary() {
        assert_eq!(EmbedTheme::Dark.as_str(), "dark");
        assert_eq!(EmbedAlign::Center.as_str(), "center");
        assert_eq!(EmbedAlign::Left.as_str(), "left");
    }

    #[tokio::test]
    async fn render_all_replaces_pending_placeholders() {
        let library = FakeLibrary::new(Answer::Post);
        let mut root = MountPoint::new();
        root.push(MountNode::Pending {
            post_id: "7".into(),
        });
        root.push(MountNode::Notice(Notice::Loading));
        root.push(MountNode::Pending {
            post_id: "8".into(),
        });

        let rendered = library.render_all(&mut root, &EmbedOptions::default()).await;

        assert_eq!(rendered, 2);
        assert_eq!(library.calls(), 2);
        assert!(matches!(&root.nodes()[0], MountNode::Post(p) if p.post_id == "7"));
        assert!(matches!(&root.nodes()[1], MountNode::Notice(Notice::Loading)));
        assert!(matches!(&root.nodes()[2], MountNode::Post(p) if p.post_id == "8"));
    }

    #[tokio::test]
    async fn render_all_falls_back_to_links_on_failure() {
        let library = FakeLibrary::new(Answer::Fail);
        let mut root = MountPoint::new();
        root.push(MountNode::Pending {
            post_id: "9".into(),
        });

        let rendered = library.render_all(&mut root, &EmbedOptions::default()).await;

        assert_eq!(rendered, 0);
        assert!(matches!(
            &root.nodes()[0],
            MountNode::FallbackLink { url } if url.ends_with("/status/9")
        ));
    }
}
