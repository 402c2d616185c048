//! Persisted mission completion progress.

use applica_core::completion::CompletionSet;
use applica_core::types::MissionId;

use crate::bridge::PersistenceBridge;

/// The completed missions, mirrored to storage on every change.
pub struct MissionProgress {
    completed: CompletionSet,
    bridge: PersistenceBridge,
}

impl MissionProgress {
    /// Load saved progress; unreadable state starts empty.
    pub fn load(bridge: PersistenceBridge) -> Self {
        let completed = bridge.load_completions();
        tracing::debug!(count = completed.len(), "Loaded mission progress");
        Self { completed, bridge }
    }

    /// Mark a mission complete.
    ///
    /// Returns `true` on the first completion. Repeat completions change
    /// nothing and write nothing.
    pub fn complete(&mut self, id: MissionId) -> bool {
        if !self.completed.insert(id) {
            return false;
        }
        self.bridge.save_completions(&self.completed);
        true
    }

    pub fn is_completed(&self, id: MissionId) -> bool {
        self.completed.contains(id)
    }

    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
