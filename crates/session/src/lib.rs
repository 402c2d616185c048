//! Applica session state and its durable mirror.
//!
//! - [`storage`]: the key-value storage seam ([`KeyValueStore`]) with an
//!   in-memory and a file-backed implementation.
//! - [`bridge`]: the [`PersistenceBridge`] that reads and writes the user and
//!   completion records, swallowing storage failures.
//! - [`store`]: the single-writer [`SessionStore`] with synchronous
//!   observers.
//! - [`missions`]: [`MissionProgress`], the persisted completion set.

pub mod bridge;
pub mod missions;
pub mod storage;
pub mod store;

pub use bridge::PersistenceBridge;
pub use missions::MissionProgress;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{SessionStore, SubscriptionId};
