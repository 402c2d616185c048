//! Feed view state: posts, loading flag and the inline error message.

use applica_core::error::CoreError;
use applica_core::feed::FeedPost;
use applica_core::types::PostId;

use crate::source::FeedError;

/// Message shown inline when a fetch fails.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load the feed. Please try again.";

/// What the feed view renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    posts: Vec<FeedPost>,
    loading: bool,
    error: Option<String>,
}

impl Default for FeedState {
    /// A freshly mounted view is loading.
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the loading state for a new fetch.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the result of a fetch.
    ///
    /// Success replaces the posts and clears the error. Failure sets the
    /// inline message and empties the list.
    pub fn finish_load(&mut self, result: Result<Vec<FeedPost>, FeedError>) {
        self.loading = false;
        match result {
            Ok(posts) => {
                self.posts = posts;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load feed");
                self.posts.clear();
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Like or unlike a post, returning its updated state.
    pub fn toggle_like(&mut self, id: PostId) -> Result<&FeedPost, CoreError> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "FeedPost",
                id: id.to_string(),
            })?;
        post.toggle_like();
        Ok(post)
    }

    pub fn posts(&self) -> &[FeedPost] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loaded successfully but nothing to show.
    pub fn is_empty_feed(&self) -> bool {
        !self.loading && self.error.is_none() && self.posts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
