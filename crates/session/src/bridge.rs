//! Mirrors session state to and from durable storage.
//!
//! The stored copy is a best-effort cache. Read and parse failures are
//! logged and treated as "nothing stored"; write failures are logged and
//! dropped. Nothing here is ever surfaced to the user or retried.

use std::sync::Arc;

use applica_core::completion::CompletionSet;
use applica_core::user::User;
use serde::de::DeserializeOwned;

use crate::storage::KeyValueStore;

/// Storage key holding the JSON-serialized user.
pub const USER_KEY: &str = "applica_user";

/// Storage key holding the JSON array of completed mission ids.
pub const COMPLETED_MISSIONS_KEY: &str = "completedMissions";

/// Reads and writes the session records through a [`KeyValueStore`].
#[derive(Clone)]
pub struct PersistenceBridge {
    storage: Arc<dyn KeyValueStore>,
}

impl PersistenceBridge {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    // ---- user ----

    /// The previously saved user, or `None` when absent or unreadable.
    pub fn load_user(&self) -> Option<User> {
        self.load_json(USER_KEY)
    }

    /// Overwrite the saved user, or remove it when signed out.
    pub fn save_user(&self, user: Option<&User>) {
        match user {
            Some(user) => self.save_json(USER_KEY, user),
            None => {
                if let Err(e) = self.storage.remove(USER_KEY) {
                    tracing::warn!(error = ?e, key = USER_KEY, "Failed to clear saved session");
                }
            }
        }
    }

    // ---- completions ----

    /// The saved completion set, or an empty set when absent or unreadable.
    pub fn load_completions(&self) -> CompletionSet {
        self.load_json(COMPLETED_MISSIONS_KEY).unwrap_or_default()
    }

    pub fn save_completions(&self, completions: &CompletionSet) {
        self.save_json(COMPLETED_MISSIONS_KEY, completions);
    }

    // ---- private helpers ----

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = ?e, key, "Failed to read saved state, starting empty");
                return None;
            }
        };

        // A stored JSON `null` reads as absent rather than as a parse error.
        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, key, "Saved state is not valid JSON, starting empty");
                None
            }
        }
    }

    fn save_json<T: serde::Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, key, "Failed to serialize state");
                return;
            }
        };

        if let Err(e) = self.storage.set(key, &raw) {
            tracing::warn!(error = ?e, key, "Failed to save state");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
