//! Runs feed fetches into shared view state.
//!
//! The loader owns a mounted flag, modelled as a [`CancellationToken`]. An
//! in-flight fetch is never aborted; when its response arrives after
//! [`FeedLoader::unmount`] it is simply discarded.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::source::FeedSource;
use crate::state::FeedState;

/// Loads the feed for one mounted feed view.
///
/// Cheaply cloneable; clones share the same state and mounted flag.
#[derive(Clone)]
pub struct FeedLoader {
    state: Arc<Mutex<FeedState>>,
    source: Arc<dyn FeedSource>,
    mounted: CancellationToken,
}

impl FeedLoader {
    /// Mount a feed view backed by `source`.
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedState::new())),
            source,
            mounted: CancellationToken::new(),
        }
    }

    /// Shared handle to the view state.
    pub fn state(&self) -> Arc<Mutex<FeedState>> {
        Arc::clone(&self.state)
    }

    /// Copy of the current view state.
    pub async fn snapshot(&self) -> FeedState {
        self.state.lock().await.clone()
    }

    /// Run one fetch and apply its result.
    ///
    /// Returns `false` when the result was discarded because the view was
    /// unmounted before it arrived (or before the fetch started).
    pub async fn load(&self) -> bool {
        if self.mounted.is_cancelled() {
            return false;
        }

        self.state.lock().await.begin_load();

        let result = self.source.fetch().await;

        if self.mounted.is_cancelled() {
            tracing::debug!("Feed view unmounted, discarding late response");
            return false;
        }

        self.state.lock().await.finish_load(result);
        true
    }

    /// Run [`load`](Self::load) on a background task.
    pub fn spawn_load(&self) -> JoinHandle<bool> {
        let loader = self.clone();
        tokio::spawn(async move { loader.load().await })
    }

    /// Mark the view as gone. Later responses are dropped.
    pub fn unmount(&self) {
        self.mounted.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.mounted.is_cancelled()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
