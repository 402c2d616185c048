//! End-to-end tests of the onboarding to feed flow.

use std::sync::Arc;
use std::time::Duration;

use applica_app::cli::{self, Cli};
use applica_app::{ActionError, App, AppConfig};
use applica_core::route::View;
use applica_core::user::UserPatch;
use applica_events::BufferedAuditSink;
use applica_feed::{MockFeedSource, LOAD_ERROR_MESSAGE};
use applica_session::{FileStore, KeyValueStore, MemoryStore};
use assert_matches::assert_matches;
use clap::Parser;

fn answers(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn instant_feed() -> Arc<MockFeedSource> {
    Arc::new(MockFeedSource::default().with_delay(Duration::ZERO))
}

fn boot(storage: Arc<dyn KeyValueStore>) -> (App, Arc<BufferedAuditSink>) {
    let audit = Arc::new(BufferedAuditSink::default());
    let app = App::boot(storage, instant_feed(), audit.clone());
    (app, audit)
}

fn test_config(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        feed_url: None,
        feed_mock_delay: Duration::ZERO,
        audit_buffer_capacity: 100,
    }
}

// ---------------------------------------------------------------------------
// Test: purpose test answers become the stored summary
// ---------------------------------------------------------------------------

#[test]
fn purpose_test_stores_summary_and_opens_missions() {
    let (mut app, audit) = boot(Arc::new(MemoryStore::new()));

    assert_eq!(app.start_onboarding(), View::PurposeTest);
    let view = app
        .submit_purpose_test(&answers(&["a", "b", "c", "d"]))
        .unwrap();

    assert_eq!(view, View::Missions);
    let user = app.session().get().unwrap();
    assert_eq!(user.purpose_summary.as_deref(), Some("a | b | c | d"));
    assert!(user.purpose_test_complete());
    assert!(user.onboarding_complete());

    let names: Vec<String> = audit
        .snapshot()
        .into_iter()
        .map(|e| e.event_name)
        .collect();
    assert_eq!(
        names,
        vec![
            "onboarding_complete",
            "route_change",
            "purpose_test_complete",
            "route_change"
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: blank answers are rejected without mutation
// ---------------------------------------------------------------------------

#[test]
fn missing_answers_are_reported() {
    let (mut app, audit) = boot(Arc::new(MemoryStore::new()));

    assert_matches!(
        app.submit_purpose_test(&answers(&["a", "", "c"])),
        Err(ActionError::Unanswered(idx)) if idx == vec![1, 3]
    );
    assert!(!app.session().is_signed_in());
    assert!(audit.is_empty());
}

// ---------------------------------------------------------------------------
// Test: actions complete without any audit recording
// ---------------------------------------------------------------------------

#[test]
fn actions_work_with_the_noop_sink() {
    let mut app = App::boot_unaudited(Arc::new(MemoryStore::new()), instant_feed());

    app.start_onboarding();
    assert_eq!(
        app.submit_purpose_test(&answers(&["a", "b", "c", "d"])).unwrap(),
        View::Missions
    );
    assert!(app.complete_mission(4).unwrap());
    assert_eq!(app.current_view(), View::Feed);
}

// ---------------------------------------------------------------------------
// Test: completing a mission twice only counts once
// ---------------------------------------------------------------------------

#[test]
fn mission_completion_is_idempotent() {
    let (mut app, audit) = boot(Arc::new(MemoryStore::new()));
    app.session_mut().set(UserPatch {
        id: Some("u-1".to_string()),
        ..UserPatch::default()
    });

    assert!(app.complete_mission(1).unwrap());
    assert!(!app.complete_mission(1).unwrap());

    let completions: Vec<_> = audit
        .snapshot()
        .into_iter()
        .filter(|e| e.event_name == "mission_complete")
        .collect();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].field("userId").unwrap(), "u-1");

    let cards = app.missions();
    assert_eq!(cards.len(), 4);
    assert!(cards[0].completed);
    assert!(cards[1..].iter().all(|c| !c.completed));
}

// ---------------------------------------------------------------------------
// Test: feed failure shows the inline message; likes are audited
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_feed_shows_message() {
    let audit = Arc::new(BufferedAuditSink::default());
    let app = App::boot(
        Arc::new(MemoryStore::new()),
        Arc::new(MockFeedSource::failing("offline").with_delay(Duration::ZERO)),
        audit,
    );

    let state = app.load_feed().await;
    assert!(!state.is_loading());
    assert!(state.posts().is_empty());
    assert_eq!(state.error(), Some(LOAD_ERROR_MESSAGE));
}

#[tokio::test]
async fn like_toggles_and_is_audited() {
    let (app, audit) = boot(Arc::new(MemoryStore::new()));

    let state = app.load_feed().await;
    let before = state.posts()[0].clone();

    let liked = app.toggle_like(before.id).await.unwrap();
    assert_eq!(liked.likes, before.likes + 1);
    assert!(liked.liked_by_current_user);

    let unliked = app.toggle_like(before.id).await.unwrap();
    assert_eq!(unliked, before);

    let likes: Vec<_> = audit
        .snapshot()
        .into_iter()
        .filter(|e| e.event_name == "post_like")
        .collect();
    assert_eq!(likes.len(), 2);
    assert_eq!(likes[0].field("liked").unwrap(), true);
    assert_eq!(likes[1].field("liked").unwrap(), false);
    assert_eq!(likes[0].field("userId").unwrap(), "anonymous");
}

// ---------------------------------------------------------------------------
// Test: progress survives a reload from disk
// ---------------------------------------------------------------------------

#[test]
fn reload_restores_user_and_missions() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (mut app, _) = boot(Arc::new(FileStore::open(dir.path()).unwrap()));
        app.update_profile(UserPatch {
            name: Some("Sage".to_string()),
            ..UserPatch::default()
        })
        .unwrap();
        app.start_onboarding();
        app.submit_purpose_test(&answers(&["w", "x", "y", "z"]))
            .unwrap();
        app.complete_mission(3).unwrap();
    }

    let (app, _) = boot(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert!(!app.session().is_loading());

    let profile = app.profile().unwrap();
    assert_eq!(profile.name, "Sage");
    assert_eq!(profile.email, "Not provided");
    assert_eq!(profile.bio, "No bio added yet.");
    assert_eq!(profile.missions_completed, vec!["Volunteer in Your Area"]);
    assert_eq!(profile.purpose_insight.as_deref(), Some("w | x | y | z"));
}

#[test]
fn logout_clears_the_saved_session() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (mut app, _) = boot(Arc::new(FileStore::open(dir.path()).unwrap()));
        app.start_onboarding();
        assert_eq!(app.logout(), View::Onboarding);
    }

    let (app, _) = boot(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert!(!app.session().is_signed_in());
    assert!(app.profile().is_none());
}

// ---------------------------------------------------------------------------
// Test: command-line invocations share state through the data directory
// ---------------------------------------------------------------------------

async fn invoke(config: &AppConfig, args: &[&str]) -> String {
    let argv = std::iter::once("applica").chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).unwrap();
    cli::run(cli, config.clone()).await.unwrap()
}

#[tokio::test]
async fn cli_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let out = invoke(&config, &["show"]).await;
    assert!(out.contains("Not signed in"));

    let out = invoke(&config, &["start"]).await;
    assert!(out.contains("Purpose Test"));

    let out = invoke(&config, &["purpose-test", "--answer", "a", "--answer", "b"]).await;
    assert_eq!(out, "Please answer all questions (missing: 3, 4).");

    let out = invoke(
        &config,
        &[
            "purpose-test", "--answer", "a", "--answer", "b", "--answer", "c", "--answer", "d",
        ],
    )
    .await;
    assert!(out.starts_with("Purpose saved: a | b | c | d"));

    let out = invoke(&config, &["complete", "2"]).await;
    assert!(out.starts_with("Mission 2 completed."));
    assert!(out.contains("Kai"));

    let out = invoke(&config, &["complete", "2"]).await;
    assert_eq!(out, "Mission 2 is already completed.");

    let out = invoke(&config, &["--audit", "profile"]).await;
    assert!(out.contains("Interview Someone Inspiring"));
    assert!(out.contains("Purpose insight: a | b | c | d"));
    assert!(out.contains("\"eventName\":\"route_change\""));

    invoke(&config, &["logout"]).await;
    let out = invoke(&config, &["profile"]).await;
    assert!(out.starts_with("You're not logged in."));
}

#[tokio::test]
async fn cli_unknown_mission_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli::try_parse_from(["applica", "complete", "42"]).unwrap();

    let err = cli::run(cli, test_config(dir.path())).await.unwrap_err();
    assert!(err.to_string().contains("Mission"));
}

// ---------------------------------------------------------------------------
// Test: an unusable data directory starts signed out instead of failing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unusable_data_dir_falls_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("not_a_dir");
    std::fs::write(&not_a_dir, "plain file").unwrap();
    let config = test_config(&not_a_dir);

    let out = invoke(&config, &["show"]).await;
    assert!(out.starts_with("View: Onboarding"));
    assert!(out.contains("Not signed in"));

    let out = invoke(&config, &["start"]).await;
    assert!(out.contains("Purpose Test"));

    // Nothing was saved, so the next invocation is signed out again.
    let out = invoke(&config, &["profile"]).await;
    assert!(out.starts_with("You're not logged in."));

    let app = App::from_config(&config, Arc::new(BufferedAuditSink::default()));
    assert!(!app.session().is_loading());
    assert!(!app.session().is_signed_in());
}
