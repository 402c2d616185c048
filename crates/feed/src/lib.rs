//! Applica social feed.
//!
//! - [`FeedSource`]: where posts come from: [`HttpFeedSource`] (a single
//!   `GET` to the feed endpoint) or [`MockFeedSource`] (hard-coded posts).
//! - [`FeedState`]: posts plus loading and error state for the feed view.
//! - [`FeedLoader`]: runs one fetch at a time into shared state and drops
//!   responses that arrive after the view is gone.

pub mod loader;
pub mod source;
pub mod state;

pub use loader::FeedLoader;
pub use source::{FeedError, FeedSource, HttpFeedSource, MockFeedSource};
pub use state::{FeedState, LOAD_ERROR_MESSAGE};
