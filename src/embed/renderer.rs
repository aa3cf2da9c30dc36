// SPDX-License-Identifier: MPL-2.0
//! Renders one embedded post into the modal.
//!
//! The renderer is driven entirely by the caller: [`TweetRenderer::open`] when
//! an item is shown, [`TweetRenderer::poll`] on every readiness tick while the
//! library is loading, [`TweetRenderer::complete`] when the creation task
//! finishes, and [`TweetRenderer::close`] on dismissal. Each open starts a new
//! session; results carrying an older session are dropped.
//!
//! ```text
//! Idle ─open─▶ ExtractingId ─no id─▶ Failed(NoPostId)
//!                  │
//!                  ▼
//!           AwaitingLibrary ─poll (not ready)─┐
//!                  │  ▲─────────────────────────┘
//!                  │ ready
//!                  ▼
//!              Rendering ─Some─▶ Rendered
//!                  ├────None───▶ Failed(EmptyResult)
//!                  └────Err────▶ Failed(RenderError)
//! ```

use super::loader::EmbedLoader;
use super::mount::{MountNode, MountPoint, Notice};
use super::{extract_post_id, EmbedLibrary, EmbedOptions, EmbedResult};
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identifies one open-to-close cycle of the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(u64);

impl SessionId {
    fn next(self) -> Self {
        SessionId(self.0.wrapping_add(1))
    }
}

/// Why a post could not be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFailure {
    NoPostId,
    RenderError(String),
    EmptyResult,
    /// The library did not become ready within the configured wait.
    TimedOut,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFailure::NoPostId => f.write_str("no post id"),
            RenderFailure::RenderError(msg) => write!(f, "render error: {}", msg),
            RenderFailure::EmptyResult => f.write_str("empty result"),
            RenderFailure::TimedOut => f.write_str("timed out waiting for the embed library"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    ExtractingId,
    AwaitingLibrary {
        post_id: String,
    },
    Rendering {
        post_id: String,
    },
    Rendered,
    Failed(RenderFailure),
}

/// A single embed creation the caller must run.
pub struct EmbedRequest {
    pub session: SessionId,
    pub post_id: String,
    library: Arc<dyn EmbedLibrary>,
    options: EmbedOptions,
}

impl EmbedRequest {
    /// Starts the creation call.
    pub fn run(self) -> BoxFuture<'static, EmbedResult> {
        self.library.create_embed(&self.post_id, &self.options)
    }
}

impl fmt::Debug for EmbedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedRequest")
            .field("session", &self.session)
            .field("post_id", &self.post_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct TweetRenderer {
    state: RenderState,
    session: SessionId,
    mount: MountPoint,
    post_url: String,
    options: EmbedOptions,
    max_wait: Option<Duration>,
    awaiting_since: Option<Instant>,
    polls: u32,
    creation_requests: u32,
}

impl TweetRenderer {
    #[must_use]
    pub fn new(options: EmbedOptions, max_wait: Option<Duration>) -> Self {
        Self {
            state: RenderState::Idle,
            session: SessionId::default(),
            mount: MountPoint::new(),
            post_url: String::new(),
            options,
            max_wait: max_wait.filter(|wait| !wait.is_zero()),
            awaiting_since: None,
            polls: 0,
            creation_requests: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    #[must_use]
    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// URL of the post currently shown (used for the fallback link).
    #[must_use]
    pub fn post_url(&self) -> &str {
        &self.post_url
    }

    /// True while readiness polling is needed.
    #[must_use]
    pub fn is_awaiting_library(&self) -> bool {
        matches!(self.state, RenderState::AwaitingLibrary { .. })
    }

    /// Readiness checks made in the current session, the initial one excluded.
    #[must_use]
    pub fn poll_count(&self) -> u32 {
        self.polls
    }

    /// Creation requests issued in the current session: 0 or 1.
    #[must_use]
    pub fn creation_requests(&self) -> u32 {
        self.creation_requests
    }

    /// Starts a new session for `post_url`.
    ///
    /// Returns the creation request when the library is already ready.
    pub fn open(&mut self, post_url: &str, loader: &EmbedLoader, now: Instant) -> Option<EmbedRequest> {
        self.begin_session();
        self.post_url = post_url.to_string();
        self.state = RenderState::ExtractingId;
        self.mount.replace(MountNode::Notice(Notice::Loading));

        let Some(post_id) = extract_post_id(post_url) else {
            log::debug!("no post id in {:?}", post_url);
            self.state = RenderState::Failed(RenderFailure::NoPostId);
            self.mount.replace(MountNode::Notice(Notice::NoPostId));
            return None;
        };

        self.state = RenderState::AwaitingLibrary {
            post_id: post_id.to_string(),
        };
        self.awaiting_since = Some(now);
        self.try_render(loader.library(), now)
    }

    /// Re-checks readiness. Does nothing unless awaiting the library.
    pub fn poll(&mut self, loader: &EmbedLoader, now: Instant) -> Option<EmbedRequest> {
        if !self.is_awaiting_library() {
            return None;
        }
        self.polls += 1;
        self.try_render(loader.library(), now)
    }

    fn try_render(&mut self, library: Option<Arc<dyn EmbedLibrary>>, now: Instant) -> Option<EmbedRequest> {
        let RenderState::AwaitingLibrary { post_id } = &self.state else {
            return None;
        };
        let post_id = post_id.clone();

        let Some(library) = library else {
            if self.wait_exceeded(now) {
                log::warn!("embed library not ready after {:?}, giving up", self.max_wait);
                self.state = RenderState::Failed(RenderFailure::TimedOut);
                self.mount.replace(MountNode::Notice(Notice::TimedOut));
                self.push_fallback_link();
            }
            return None;
        };

        self.mount.clear();
        self.mount.push(MountNode::Notice(Notice::Loading));
        self.state = RenderState::Rendering {
            post_id: post_id.clone(),
        };
        self.creation_requests += 1;

        Some(EmbedRequest {
            session: self.session,
            post_id,
            library,
            options: self.options,
        })
    }

    fn wait_exceeded(&self, now: Instant) -> bool {
        match (self.max_wait, self.awaiting_since) {
            (Some(max), Some(since)) => now.saturating_duration_since(since) >= max,
            _ => false,
        }
    }

    /// Applies the result of a creation request.
    ///
    /// Returns `false` when the result belongs to another session and was
    /// ignored.
    pub fn complete(&mut self, session: SessionId, result: EmbedResult) -> bool {
        if session != self.session || !matches!(self.state, RenderState::Rendering { .. }) {
            log::debug!("ignoring stale embed result for {:?}", session);
            return false;
        }

        match result {
            Ok(Some(post)) => {
                self.mount.replace(MountNode::Post(post));
                self.state = RenderState::Rendered;
            }
            Ok(None) => {
                self.state = RenderState::Failed(RenderFailure::EmptyResult);
                self.mount.clear();
                self.push_fallback_link();
            }
            Err(err) => {
                log::warn!("embed creation failed: {}", err);
                self.state = RenderState::Failed(RenderFailure::RenderError(err.to_string()));
                self.mount.clear();
                self.push_fallback_link();
            }
        }
        true
    }

    /// Ends the session. Pending results are ignored from here on.
    pub fn close(&mut self) {
        self.begin_session();
        self.post_url.clear();
        self.state = RenderState::Idle;
    }

    fn begin_session(&mut self) {
        self.session = self.session.next();
        self.mount.clear();
        self.awaiting_since = None;
        self.polls = 0;
        self.creation_requests = 0;
    }

    fn push_fallback_link(&mut self) {
        self.mount.push(MountNode::FallbackLink {
            url: self.post_url.clone(),
        });
    }
}
