//! Applica development feed server.
//!
//! Serves the feed endpoint the client fetches from, so the HTTP feed source
//! can be exercised without a real backend. Exposes config, state, error
//! handling and routes so integration tests and the binary share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
