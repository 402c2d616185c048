//! The application controller.
//!
//! [`App`] owns every piece of client state and exposes the actions the
//! views trigger. Each action mutates state, records an audit event and
//! navigates, in that order.

use std::sync::Arc;

use applica_core::audit::{actor_id, event_names, fields};
use applica_core::error::CoreError;
use applica_core::feed::FeedPost;
use applica_core::mission::{self, Mission};
use applica_core::purpose;
use applica_core::route::{Route, View};
use applica_core::types::{MissionId, PostId};
use applica_core::user::{User, UserPatch};
use applica_events::{AuditSink, NoopAuditSink};
use applica_feed::{FeedLoader, FeedSource, FeedState, HttpFeedSource, MockFeedSource};
use applica_session::{
    FileStore, KeyValueStore, MemoryStore, MissionProgress, PersistenceBridge, SessionStore,
};
use serde_json::json;

use crate::config::AppConfig;
use crate::error::ActionError;
use crate::navigator::Navigator;
use crate::profile::ProfileView;

/// A mission as shown in the mission list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionCard {
    pub mission: &'static Mission,
    pub completed: bool,
}

pub struct App {
    session: SessionStore,
    missions: MissionProgress,
    navigator: Navigator,
    feed: FeedLoader,
    audit: Arc<dyn AuditSink>,
}

impl App {
    /// Assemble an app whose session has not been restored yet.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        feed_source: Arc<dyn FeedSource>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let bridge = PersistenceBridge::new(storage);
        Self {
            session: SessionStore::new(bridge.clone()),
            missions: MissionProgress::load(bridge),
            navigator: Navigator::new(Arc::clone(&audit)),
            feed: FeedLoader::new(feed_source),
            audit,
        }
    }

    /// Assemble an app and run the startup session check.
    pub fn boot(
        storage: Arc<dyn KeyValueStore>,
        feed_source: Arc<dyn FeedSource>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let mut app = Self::new(storage, feed_source, audit);
        app.restore();
        app
    }

    /// Boot with the no-op audit sink.
    pub fn boot_unaudited(
        storage: Arc<dyn KeyValueStore>,
        feed_source: Arc<dyn FeedSource>,
    ) -> Self {
        Self::boot(storage, feed_source, Arc::new(NoopAuditSink))
    }

    /// Boot against the file-backed store and feed source named in `config`.
    ///
    /// A data directory that cannot be opened is logged and replaced by an
    /// in-memory store, so the session starts signed out.
    pub fn from_config(config: &AppConfig, audit: Arc<dyn AuditSink>) -> Self {
        let storage: Arc<dyn KeyValueStore> = match FileStore::open(config.data_dir.clone()) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!(
                    data_dir = %config.data_dir.display(),
                    error = %e,
                    "Failed to open data directory, session will not be saved"
                );
                Arc::new(MemoryStore::new())
            }
        };

        let source: Arc<dyn FeedSource> = match &config.feed_url {
            Some(url) => {
                tracing::debug!(url = %url, "Using HTTP feed source");
                Arc::new(HttpFeedSource::new(url.clone()))
            }
            None => Arc::new(MockFeedSource::default().with_delay(config.feed_mock_delay)),
        };

        Self::boot(storage, source, audit)
    }

    /// Run the startup session check. Only the first call has any effect.
    pub fn restore(&mut self) -> Option<&User> {
        self.session.restore()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current_view(&self) -> View {
        self.navigator.current_view()
    }

    pub fn audit(&self) -> &Arc<dyn AuditSink> {
        &self.audit
    }

    /// Open `path`. Landing on the onboarding view also records a
    /// `screen_view` event.
    pub fn navigate(&mut self, path: &str) -> View {
        let view = self.navigator.navigate(path);
        if view == View::Onboarding {
            self.audit.record_event(
                event_names::SCREEN_VIEW,
                json!({ (fields::SCREEN): "onboarding" }),
            );
        }
        view
    }

    // -----------------------------------------------------------------------
    // Onboarding and purpose test
    // -----------------------------------------------------------------------

    /// Mark onboarding done and advance to the purpose test.
    pub fn start_onboarding(&mut self) -> View {
        let user = self.session.set(UserPatch::onboarding_complete());
        let user_id = user.id.clone();

        self.audit.record_event(
            event_names::ONBOARDING_COMPLETE,
            json!({ (fields::USER_ID): actor_id(user_id.as_deref()) }),
        );
        self.navigator.go(Route::PurposeTest)
    }

    /// Store the purpose summary and advance to missions.
    ///
    /// Blank answers are reported by index and leave the session untouched.
    pub fn submit_purpose_test(&mut self, answers: &[String]) -> Result<View, ActionError> {
        let blank = purpose::blank_answers(answers);
        if !blank.is_empty() {
            tracing::debug!(?blank, "Purpose test submitted with blank answers");
            return Err(ActionError::Unanswered(blank));
        }
        let summary = purpose::summarize(answers)?;

        let user = self.session.set(UserPatch::purpose_result(summary));
        let user_id = user.id.clone();
        tracing::info!(user_id = ?user_id, "Purpose test completed");

        self.audit.record_event(
            event_names::PURPOSE_TEST_COMPLETE,
            json!({ (fields::USER_ID): actor_id(user_id.as_deref()) }),
        );
        Ok(self.navigator.go(Route::Missions))
    }

    // -----------------------------------------------------------------------
    // Missions
    // -----------------------------------------------------------------------

    /// Every mission template with its completion flag.
    pub fn missions(&self) -> Vec<MissionCard> {
        mission::catalog()
            .iter()
            .map(|m| MissionCard {
                mission: m,
                completed: self.missions.is_completed(m.id),
            })
            .collect()
    }

    pub fn completed_missions(&self) -> &MissionProgress {
        &self.missions
    }

    /// Complete a mission and move on to the feed.
    ///
    /// Returns `Ok(false)` without side effects if the mission was already
    /// completed.
    pub fn complete_mission(&mut self, id: MissionId) -> Result<bool, ActionError> {
        let mission = mission::find(id)?;
        if !self.missions.complete(id) {
            tracing::debug!(mission_id = id, "Mission already completed");
            return Ok(false);
        }

        let user_id = self.session.get().and_then(|u| u.id.clone());
        tracing::info!(mission_id = id, title = mission.title, "Mission completed");

        self.audit.record_event(
            event_names::MISSION_COMPLETE,
            json!({
                (fields::USER_ID): actor_id(user_id.as_deref()),
                (fields::MISSION_ID): id,
            }),
        );
        self.navigator.go(Route::Feed);
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Feed
    // -----------------------------------------------------------------------

    pub fn feed(&self) -> &FeedLoader {
        &self.feed
    }

    /// Fetch the feed and return the resulting view state.
    pub async fn load_feed(&self) -> FeedState {
        self.feed.load().await;
        self.feed.snapshot().await
    }

    /// Like or unlike a loaded post.
    pub async fn toggle_like(&self, id: PostId) -> Result<FeedPost, ActionError> {
        let post = {
            let state = self.feed.state();
            let mut state = state.lock().await;
            state.toggle_like(id)?.clone()
        };

        let user_id = self.session.get().and_then(|u| u.id.clone());
        self.audit.record_event(
            event_names::POST_LIKE,
            json!({
                (fields::USER_ID): actor_id(user_id.as_deref()),
                (fields::POST_ID): id,
                (fields::LIKED): post.liked_by_current_user,
            }),
        );
        Ok(post)
    }

    // -----------------------------------------------------------------------
    // Profile and session
    // -----------------------------------------------------------------------

    /// Merge profile edits into the current user.
    pub fn update_profile(&mut self, patch: UserPatch) -> Result<&User, ActionError> {
        if patch.is_empty() {
            return Err(CoreError::Validation("Nothing to update".to_string()).into());
        }
        Ok(self.session.set(patch))
    }

    /// Sign out and return to the entry view.
    pub fn logout(&mut self) -> View {
        let user_id = self.session.get().and_then(|u| u.id.clone());
        self.session.logout();

        self.audit.record_event(
            event_names::SESSION_LOGOUT,
            json!({ (fields::USER_ID): actor_id(user_id.as_deref()) }),
        );
        self.navigator.go(Route::Entry)
    }

    /// The profile view model, or `None` when signed out.
    pub fn profile(&self) -> Option<ProfileView> {
        self.session
            .get()
            .map(|user| ProfileView::build(user, self.missions.completed()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
