// SPDX-License-Identifier: MPL-2.0
//! The region of the modal the embedded post is rendered into.

use super::EmbeddedPost;

/// Label of the link shown when a post cannot be embedded.
pub const FALLBACK_LINK_LABEL: &str = "元のX投稿を見る →";

/// Builds a canonical permalink for a post id.
#[must_use]
pub fn permalink_for(post_id: &str) -> String {
    format!("https://x.com/i/status/{}", post_id)
}

/// Status text shown in place of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Loading,
    NoPostId,
    TimedOut,
}

impl Notice {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Notice::Loading => "X投稿を読み込み中...",
            Notice::NoPostId => "投稿IDを取得できませんでした",
            Notice::TimedOut => "X投稿を読み込めませんでした",
        }
    }
}

/// One piece of content inside a mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountNode {
    Notice(Notice),
    /// Embeddable markup not yet rendered by the library.
    Pending { post_id: String },
    Post(EmbeddedPost),
    FallbackLink { url: String },
}

/// Content container owned by a single renderer.
///
/// Every new render starts from an empty mount point; nodes from a previous
/// item are never mixed with the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoint {
    nodes: Vec<MountNode>,
}

impl MountPoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all content.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: MountNode) {
        self.nodes.push(node);
    }

    /// Clears the mount point and inserts `node` as its only content.
    pub fn replace(&mut self, node: MountNode) {
        self.clear();
        self.push(node);
    }

    #[must_use]
    pub fn nodes(&self) -> &[MountNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut MountNode> {
        self.nodes.iter_mut()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The rendered post, if the mount point holds one.
    #[must_use]
    pub fn post(&self) -> Option<&EmbeddedPost> {
        self.nodes.iter().find_map(|node| match node {
            MountNode::Post(post) => Some(post),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_discards_previous_content() {
        let mut mount = MountPoint::new();
        mount.push(MountNode::Notice(Notice::Loading));
        mount.push(MountNode::FallbackLink { url: "u".into() });

        mount.replace(MountNode::Notice(Notice::NoPostId));

        assert_eq!(mount.nodes(), &[MountNode::Notice(Notice::NoPostId)]);
    }

    #[test]
    fn clear_empties_mount_point() {
        let mut mount = MountPoint::new();
        mount.push(MountNode::Notice(Notice::Loading));
        mount.clear();
        assert!(mount.is_empty());
        assert!(mount.post().is_none());
    }

    #[test]
    fn notices_have_text() {
        assert_eq!(Notice::Loading.text(), "X投稿を読み込み中...");
        assert_eq!(Notice::NoPostId.text(), "投稿IDを取得できませんでした");
        assert!(!Notice::TimedOut.text().is_empty());
    }

    #[test]
    fn permalink_contains_id() {
        assert_eq!(permalink_for("123"), "https://x.com/i/status/123");
    }
}
