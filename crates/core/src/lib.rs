//! Applica domain types and pure rules.
//!
//! Nothing in this crate performs I/O. Storage, audit delivery and the feed
//! transport live in their own crates and depend on the types defined here.

pub mod audit;
pub mod completion;
pub mod error;
pub mod feed;
pub mod mission;
pub mod purpose;
pub mod route;
pub mod types;
pub mod user;
