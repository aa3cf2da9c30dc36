// SPDX-License-Identifier: MPL-2.0
//! One-time loading of the embed library.
//!
//! The library is bootstrapped at most once per process, no matter how many
//! modals open. Readiness is observable both by polling ([`EmbedLoader::readiness`])
//! and by subscription ([`EmbedLoader::subscribe`]).

use super::{EmbedError, EmbedLibrary};
use futures_util::future::BoxFuture;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tokio::sync::watch;

/// Load state of the embed library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    NotRequested,
    /// Bootstrap has been issued. A failed bootstrap stays here.
    Loading,
    Ready,
}

/// Bootstraps the embed library.
pub trait EmbedScript: Send + Sync {
    /// Identifier of the bootstrap. Only one bootstrap per marker is ever issued.
    fn marker(&self) -> &str;

    /// Produces the library once the bootstrap completes.
    fn load(&self) -> BoxFuture<'static, Result<Arc<dyn EmbedLibrary>, EmbedError>>;
}

struct Inner {
    script: Box<dyn EmbedScript>,
    state: Mutex<LoaderState>,
    readiness: watch::Sender<Readiness>,
}

#[derive(Default)]
struct LoaderState {
    injections: usize,
    library: Option<Arc<dyn EmbedLibrary>>,
}

/// Shared handle to the embed library loader. Clones share state.
#[derive(Clone)]
pub struct EmbedLoader {
    inner: Arc<Inner>,
}

static GLOBAL: OnceLock<EmbedLoader> = OnceLock::new();

impl EmbedLoader {
    pub fn new(script: impl EmbedScript + 'static) -> Self {
        let (readiness, _) = watch::channel(Readiness::NotRequested);
        Self {
            inner: Arc::new(Inner {
                script: Box::new(script),
                state: Mutex::new(LoaderState::default()),
                readiness,
            }),
        }
    }

    /// Returns the process-wide loader, creating it with `init` on first use.
    pub fn global_or_init(init: impl FnOnce() -> EmbedLoader) -> &'static EmbedLoader {
        GLOBAL.get_or_init(init)
    }

    /// Returns the process-wide loader if one was created.
    pub fn global() -> Option<&'static EmbedLoader> {
        GLOBAL.get()
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests the library.
    ///
    /// The first call marks the loader as loading and returns the bootstrap
    /// future, which the caller must drive. Later calls return `None`, so the
    /// bootstrap is never issued twice. Calling this after the library is
    /// ready has no effect.
    pub fn ensure_loaded(&self) -> Option<BoxFuture<'static, Readiness>> {
        let mut state = self.lock();
        if state.injections > 0 {
            return None;
        }
        state.injections += 1;
        drop(state);

        log::debug!("loading embed library ({})", self.inner.script.marker());
        self.inner.readiness.send_replace(Readiness::Loading);

        let bootstrap = self.inner.script.load();
        let inner = Arc::clone(&self.inner);
        Some(Box::pin(async move {
            match bootstrap.await {
                Ok(library) => {
                    inner
                        .state
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .library = Some(library);
                    inner.readiness.send_replace(Readiness::Ready);
                    log::info!("embed library ready");
                    Readiness::Ready
                }
                Err(err) => {
                    log::warn!("embed library failed to load: {}", err);
                    Readiness::Loading
                }
            }
        }))
    }

    #[must_use]
    pub fn readiness(&self) -> Readiness {
        *self.inner.readiness.borrow()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.readiness() == Readiness::Ready
    }

    /// The loaded library, once ready.
    #[must_use]
    pub fn library(&self) -> Option<Arc<dyn EmbedLibrary>> {
        self.lock().library.clone()
    }

    /// Receiver notified on every readiness change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.inner.readiness.subscribe()
    }

    /// Resolves once the library is ready.
    ///
    /// Never resolves if the bootstrap failed.
    pub async fn wait_ready(&self) {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so this only errors on teardown.
        let _ = rx.wait_for(|r| *r == Readiness::Ready).await;
    }

    /// Number of bootstraps issued: 0 or 1.
    #[must_use]
    pub fn injection_count(&self) -> usize {
        self.lock().injections
    }

    #[must_use]
    pub fn marker(&self) -> &str {
        self.inner.script.marker()
    }
}

impl std::fmt::Debug for EmbedLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbedLoader")
            .field("marker", &self.marker())
            .field("readiness", &self.readiness())
            .field("injections", &self.injection_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::test_support::{Answer, FakeLibrary, FakeScript};

    fn loader(fail: bool) -> EmbedLoader {
        EmbedLoader::new(FakeScript {
            library: FakeLibrary::new(Answer::Post),
            fail,
        })
    }

    #[test]
    fn starts_not_requested() {
        let loader = loader(false);
        assert_eq!(loader.readiness(), Readiness::NotRequested);
        assert_eq!(loader.injection_count(), 0);
        assert!(loader.library().is_none());
    }

    #[tokio::test]
    async fn first_request_loads_library() {
        let loader = loader(false);
        let bootstrap = loader.ensure_loaded().expect("first call bootstraps");
        assert_eq!(loader.readiness(), Readiness::Loading);

        assert_eq!(bootstrap.await, Readiness::Ready);
        assert!(loader.is_ready());
        assert!(loader.library().is_some());
    }

    #[tokio::test]
    async fn bootstrap_is_issued_once() {
        let loader = loader(false);
        let first = loader.ensure_loaded();
        assert!(first.is_some());
        assert!(loader.ensure_loaded().is_none());

        if let Some(fut) = first {
            fut.await;
        }
        assert!(loader.ensure_loaded().is_none());
        assert_eq!(loader.injection_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let loader = loader(false);
        let other = loader.clone();
        if let Some(fut) = loader.ensure_loaded() {
            fut.await;
        }
        assert!(other.ensure_loaded().is_none());
        assert!(other.is_ready());
    }

    #[tokio::test]
    async fn failed_bootstrap_stays_loading() {
        let loader = loader(true);
        let readiness = loader.ensure_loaded().expect("bootstrap").await;
        assert_eq!(readiness, Readiness::Loading);
        assert_eq!(loader.readiness(), Readiness::Loading);
        assert!(loader.library().is_none());
        assert!(loader.ensure_loaded().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_ready() {
        let loader = loader(false);
        let mut rx = loader.subscribe();
        let bootstrap = loader.ensure_loaded().expect("bootstrap");

        let waiter = {
            let loader = loader.clone();
            tokio::spawn(async move { loader.wait_ready().await })
        };
        bootstrap.await;

        waiter.await.expect("waiter completes");
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(*rx.borrow_and_update(), Readiness::Ready);
    }
}
