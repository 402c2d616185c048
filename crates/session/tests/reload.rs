//! Integration tests for restoring a session across "page loads".

use std::sync::Arc;

use applica_core::user::{User, UserPatch};
use applica_session::{
    FileStore, KeyValueStore, MissionProgress, PersistenceBridge, SessionStore, StorageError,
};

fn file_bridge(dir: &std::path::Path) -> PersistenceBridge {
    PersistenceBridge::new(Arc::new(FileStore::open(dir).unwrap()))
}

// ---------------------------------------------------------------------------
// Test: persist then reload restores an equivalent user
// ---------------------------------------------------------------------------

#[test]
fn reload_restores_equivalent_user() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = SessionStore::open(file_bridge(dir.path()));
    assert!(first.get().is_none());
    first.set(UserPatch {
        id: Some("u-42".to_string()),
        name: Some("Kai".to_string()),
        email: Some("kai@example.com".to_string()),
        bio: Some("Builder".to_string()),
        ..UserPatch::default()
    });
    first.set(UserPatch::onboarding_complete());
    first.set(UserPatch::purpose_result("a | b | c | d"));
    let before: User = first.get().cloned().unwrap();
    drop(first);

    let second = SessionStore::open(file_bridge(dir.path()));
    assert_eq!(second.get(), Some(&before));
}

// ---------------------------------------------------------------------------
// Test: logout survives a reload
// ---------------------------------------------------------------------------

#[test]
fn logout_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = SessionStore::open(file_bridge(dir.path()));
    first.set(UserPatch::onboarding_complete());
    first.logout();

    let second = SessionStore::open(file_bridge(dir.path()));
    assert!(second.get().is_none());
}

// ---------------------------------------------------------------------------
// Test: mission progress survives a reload
// ---------------------------------------------------------------------------

#[test]
fn mission_progress_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut progress = MissionProgress::load(file_bridge(dir.path()));
    progress.complete(2);
    progress.complete(2);
    progress.complete(1);

    let reloaded = MissionProgress::load(file_bridge(dir.path()));
    assert_eq!(reloaded.completed().iter().collect::<Vec<_>>(), vec![2, 1]);
}

// ---------------------------------------------------------------------------
// Test: failing storage never blocks the in-memory store
// ---------------------------------------------------------------------------

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk gone")))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk gone")))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk gone")))
    }
}

#[test]
fn broken_storage_is_swallowed() {
    let bridge = PersistenceBridge::new(Arc::new(BrokenStore));

    let mut store = SessionStore::open(bridge.clone());
    assert!(store.get().is_none());

    store.set(UserPatch::onboarding_complete());
    assert!(store.get().unwrap().onboarding_complete());
    store.logout();
    assert!(store.get().is_none());

    let mut progress = MissionProgress::load(bridge);
    assert!(progress.complete(1));
    assert!(progress.is_completed(1));
}
