//! Feed sources.
//!
//! A source performs one fetch attempt per call. There is no retry, no
//! timeout beyond the transport's own, and no pagination.

use std::time::Duration;

use applica_core::feed::{sample_posts, FeedPost};
use async_trait::async_trait;

/// Errors from fetching the feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("Feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status code.
    #[error("Feed endpoint error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A non-HTTP source could not produce posts.
    #[error("Feed unavailable: {0}")]
    Unavailable(String),
}

/// Something that can produce the list of feed posts.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch posts in source order.
    async fn fetch(&self) -> Result<Vec<FeedPost>, FeedError>;
}

// ---------------------------------------------------------------------------
// HttpFeedSource
// ---------------------------------------------------------------------------

/// Fetches the feed with a plain `GET` returning a JSON array of posts.
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    /// * `url` - Full endpoint URL, e.g. `http://localhost:3000/api/feed`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Reuse an existing [`reqwest::Client`] (and its connection pool).
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<Vec<FeedPost>, FeedError> {
        tracing::debug!(url = %self.url, "Fetching feed");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let posts: Vec<FeedPost> = response.json().await?;
        tracing::debug!(count = posts.len(), "Feed fetched");
        Ok(posts)
    }
}

// ---------------------------------------------------------------------------
// MockFeedSource
// ---------------------------------------------------------------------------

/// Simulated latency of the mock source.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(500);

/// Serves fixed posts after a delay, or fails with a fixed message.
#[derive(Debug, Clone)]
pub struct MockFeedSource {
    outcome: Result<Vec<FeedPost>, String>,
    delay: Duration,
}

impl MockFeedSource {
    pub fn new(posts: Vec<FeedPost>) -> Self {
        Self {
            outcome: Ok(posts),
            delay: DEFAULT_MOCK_DELAY,
        }
    }

    /// A source whose every fetch fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
            delay: DEFAULT_MOCK_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockFeedSource {
    fn default() -> Self {
        Self::new(sample_posts())
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(&self) -> Result<Vec<FeedPost>, FeedError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone().map_err(FeedError::Unavailable)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
