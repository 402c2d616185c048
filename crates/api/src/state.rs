use std::path::Path;
use std::sync::Arc;

use applica_core::feed::{sample_posts, FeedPost};

use crate::config::ServerConfig;
use crate::error::AppResult;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Posts served by `GET /api/feed`, in feed order.
    pub posts: Arc<Vec<FeedPost>>,
}

impl AppState {
    /// Build state from configuration, reading the feed fixture if one is set.
    pub fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let posts = match &config.feed_fixture {
            Some(path) => load_fixture(path)?,
            None => sample_posts(),
        };
        tracing::info!(count = posts.len(), "Feed posts loaded");

        Ok(Self {
            posts: Arc::new(posts),
        })
    }
}

/// Read a JSON array of posts from disk.
pub fn load_fixture(path: &Path) -> AppResult<Vec<FeedPost>> {
    let raw = std::fs::read_to_string(path)?;
    let posts = serde_json::from_str(&raw)?;
    Ok(posts)
}
