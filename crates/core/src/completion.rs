//! The set of missions a user has completed.

use serde::{Deserialize, Serialize};

use crate::types::MissionId;

/// Insertion-ordered set of completed mission ids.
///
/// Stored as a plain JSON array. Duplicates in stored data are dropped on
/// load, so the set never holds the same id twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<MissionId>", into = "Vec<MissionId>")]
pub struct CompletionSet {
    ids: Vec<MissionId>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion. Returns `false` if the id was already present.
    pub fn insert(&mut self, id: MissionId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: MissionId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in the order they were completed.
    pub fn iter(&self) -> impl Iterator<Item = MissionId> + '_ {
        self.ids.iter().copied()
    }
}

impl From<Vec<MissionId>> for CompletionSet {
    fn from(ids: Vec<MissionId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }
}

impl From<CompletionSet> for Vec<MissionId> {
    fn from(set: CompletionSet) -> Self {
        set.ids
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
