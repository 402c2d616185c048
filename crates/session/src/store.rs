//! The session store: the single owner of the current user.
//!
//! All mutations go through `&mut self`, so there is exactly one writer at a
//! time by construction. Each mutation is mirrored through the
//! [`PersistenceBridge`] and then announced to every observer before the
//! mutating call returns.

use applica_core::user::{User, UserPatch};

use crate::bridge::PersistenceBridge;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(Option<&User>) + Send>;

/// Holds the signed-in user, or nothing when signed out.
pub struct SessionStore {
    user: Option<User>,
    loading: bool,
    bridge: PersistenceBridge,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl SessionStore {
    /// Create a store that has not yet checked for a saved session.
    ///
    /// The store reports [`is_loading`](Self::is_loading) until
    /// [`restore`](Self::restore) runs.
    pub fn new(bridge: PersistenceBridge) -> Self {
        Self {
            user: None,
            loading: true,
            bridge,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store and immediately restore any saved session.
    pub fn open(bridge: PersistenceBridge) -> Self {
        let mut store = Self::new(bridge);
        store.restore();
        store
    }

    /// Run the startup session check.
    ///
    /// Reads the saved user through the bridge; unreadable state counts as
    /// signed out. Only the first call does anything, and a user set while
    /// loading is kept instead of the saved copy.
    pub fn restore(&mut self) -> Option<&User> {
        if self.loading {
            self.loading = false;
            if self.user.is_none() {
                if let Some(saved) = self.bridge.load_user() {
                    tracing::info!(user_id = ?saved.id, "Restored saved session");
                    self.user = Some(saved);
                    self.notify();
                } else {
                    tracing::debug!("No saved session");
                }
            }
        }
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current user, or `None` when signed out.
    pub fn get(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Merge `patch` into the current user, creating one if signed out.
    pub fn set(&mut self, patch: UserPatch) -> &User {
        match self.user.as_mut() {
            Some(user) => user.apply(patch),
            None => self.user = Some(User::from_patch(patch)),
        }
        self.commit();
        self.user.get_or_insert_with(User::default)
    }

    /// Replace the current user wholesale.
    pub fn login(&mut self, user: User) {
        tracing::info!(user_id = ?user.id, "User signed in");
        self.user = Some(user);
        self.commit();
    }

    /// Sign out. The saved session is removed as well.
    pub fn logout(&mut self) {
        if self.user.take().is_some() {
            tracing::info!("User signed out");
        }
        self.commit();
    }

    /// Register an observer called with the new value after every change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(Option<&User>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    // ---- private helpers ----

    fn commit(&mut self) {
        self.bridge.save_user(self.user.as_ref());
        self.notify();
    }

    fn notify(&mut self) {
        let user = self.user.as_ref();
        for (_, observer) in &mut self.observers {
            observer(user);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::bridge::USER_KEY;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn store_over(memory: MemoryStore) -> (SessionStore, Arc<MemoryStore>) {
        let memory = Arc::new(memory);
        let store = SessionStore::new(PersistenceBridge::new(memory.clone()));
        (store, memory)
    }

    #[test]
    fn starts_loading_and_signed_out() {
        let (mut store, _) = store_over(MemoryStore::new());
        assert!(store.is_loading());
        assert!(store.restore().is_none());
        assert!(!store.is_loading());
        assert!(!store.is_signed_in());
    }

    #[test]
    fn set_on_signed_out_creates_user() {
        let (mut store, _) = store_over(MemoryStore::new());
        store.restore();

        let user = store.set(UserPatch {
            email: Some("kai@example.com".to_string()),
            ..UserPatch::default()
        });
        assert_eq!(user.email.as_deref(), Some("kai@example.com"));
        assert!(user.name.is_none());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let (mut store, memory) = store_over(MemoryStore::new());
        store.restore();

        store.set(UserPatch::onboarding_complete());
        assert_eq!(
            memory.get(USER_KEY).unwrap().as_deref(),
            Some(r#"{"onboardingComplete":true}"#)
        );

        store.set(UserPatch::purpose_result("x"));
        let saved: User = serde_json::from_str(&memory.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(&saved, store.get().unwrap());

        store.logout();
        assert_eq!(memory.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn login_replaces_the_whole_user() {
        let (mut store, memory) = store_over(MemoryStore::new());
        store.restore();
        store.set(UserPatch::purpose_result("old"));

        let fresh = User::from_patch(UserPatch {
            id: Some("u-7".to_string()),
            ..UserPatch::default()
        });
        store.login(fresh.clone());

        assert_eq!(store.get(), Some(&fresh));
        assert_eq!(
            memory.get(USER_KEY).unwrap().as_deref(),
            Some(r#"{"id":"u-7"}"#)
        );
    }

    #[test]
    fn observers_see_every_change_in_order() {
        let (mut store, _) = store_over(MemoryStore::new());
        store.restore();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |user| {
            sink.lock()
                .unwrap()
                .push(user.and_then(|u| u.name.clone()));
        });

        store.set(UserPatch {
            name: Some("Kai".to_string()),
            ..UserPatch::default()
        });
        store.set(UserPatch {
            name: Some("Sage".to_string()),
            ..UserPatch::default()
        });
        store.logout();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("Kai".to_string()), Some("Sage".to_string()), None]
        );
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let (mut store, _) = store_over(MemoryStore::new());
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_| *counter.lock().unwrap() += 1);

        store.set(UserPatch::onboarding_complete());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set(UserPatch::onboarding_complete());

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn restore_reads_saved_user_once() {
        let (mut store, memory) =
            store_over(MemoryStore::new().with_entry(USER_KEY, r#"{"name":"Rei"}"#));

        assert_eq!(store.restore().and_then(|u| u.name.as_deref()), Some("Rei"));

        memory.set(USER_KEY, r#"{"name":"Other"}"#).unwrap();
        assert_eq!(store.restore().and_then(|u| u.name.as_deref()), Some("Rei"));
    }

    #[test]
    fn user_set_while_loading_wins_over_saved_copy() {
        let (mut store, _) =
            store_over(MemoryStore::new().with_entry(USER_KEY, r#"{"name":"Saved"}"#));

        store.set(UserPatch {
            name: Some("Fresh".to_string()),
            ..UserPatch::default()
        });
        store.restore();

        assert_eq!(store.get().and_then(|u| u.name.as_deref()), Some("Fresh"));
    }

    #[test]
    fn corrupt_saved_session_starts_signed_out() {
        let (mut store, _) = store_over(MemoryStore::new().with_entry(USER_KEY, "]]"));
        assert!(store.restore().is_none());
        assert!(!store.is_loading());
    }
}
