//! Command-line front end.
//!
//! Every invocation behaves like a fresh page load: the session and mission
//! progress are restored from the data directory, one action runs, and the
//! resulting view is rendered as plain text.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use applica_core::feed::FeedPost;
use applica_core::purpose::QUESTIONS;
use applica_core::route::{is_nav_active, Route, View, NAV_ITEMS};
use applica_core::types::{MissionId, PostId};
use applica_core::user::{User, UserPatch};
use applica_events::{AuditSink, BufferedAuditSink, FanoutAuditSink, TracingAuditSink};
use applica_feed::FeedState;

use crate::app::{App, MissionCard};
use crate::config::AppConfig;
use crate::error::ActionError;
use crate::profile::ProfileView;

#[derive(Debug, Parser)]
#[command(name = "applica", version, about = "Find your purpose, one mission at a time")]
pub struct Cli {
    /// Directory holding the saved session (overrides APPLICA_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print the audit events recorded by this invocation as JSON lines.
    #[arg(long, global = true)]
    pub audit: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the signed-in user and the entry view.
    Show,
    /// Open a path and report which view it selects.
    Navigate { path: String },
    /// Finish onboarding and move on to the purpose test.
    Start,
    /// Answer the purpose test, one `--answer` per question in order.
    PurposeTest {
        #[arg(long = "answer")]
        answers: Vec<String>,
    },
    /// List missions and their completion state.
    Missions,
    /// Complete a mission.
    Complete { id: MissionId },
    /// Load the feed, optionally toggling likes on posts.
    Feed {
        #[arg(long = "like")]
        like: Vec<PostId>,
    },
    /// Show the profile.
    Profile,
    /// Edit the signed-in user.
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Sign out.
    Logout,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Merge the given fields into the user, signing in if needed.
    Set {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
}

/// Text shown for any failure that reaches the top level.
pub const FAILURE_MESSAGE: &str = "Something went wrong.";

pub fn failure_report(detail: impl std::fmt::Display) -> String {
    format!("{FAILURE_MESSAGE}\n{detail}")
}

/// Report panics the same way as returned errors.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Command panicked");
        eprintln!("{}", failure_report(info));
    }));
}

/// Run one command and return the text to print.
pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<String> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let buffer = Arc::new(BufferedAuditSink::new(config.audit_buffer_capacity));
    let audit: Arc<dyn AuditSink> = Arc::new(FanoutAuditSink::new(vec![
        Arc::new(TracingAuditSink),
        buffer.clone(),
    ]));

    let mut app = App::from_config(&config, audit);

    let mut out = execute(&mut app, cli.command).await?;

    if cli.audit {
        for event in buffer.snapshot() {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }
    Ok(out)
}

/// Apply `command` to `app` and render the resulting view.
pub async fn execute(app: &mut App, command: Command) -> anyhow::Result<String> {
    let out = match command {
        Command::Show => {
            let view = app.navigate(Route::Entry.path());
            render_session(app.session().get(), view, Route::Entry.path())
        }
        Command::Navigate { path } => {
            let view = app.navigate(&path);
            let current = app.navigator().current_route().path();
            render_session(app.session().get(), view, current)
        }
        Command::Start => {
            app.navigate(Route::Onboarding.path());
            let view = app.start_onboarding();
            format!("Welcome aboard.\n\n{}", render_questions(view))
        }
        Command::PurposeTest { answers } => {
            app.navigate(Route::PurposeTest.path());
            match app.submit_purpose_test(&answers) {
                Ok(view) => {
                    let summary = app
                        .session()
                        .get()
                        .and_then(|u| u.purpose_summary.clone())
                        .unwrap_or_default();
                    format!(
                        "Purpose saved: {summary}\n\n{}",
                        render_missions(&app.missions(), view)
                    )
                }
                Err(ActionError::Unanswered(missing)) => render_unanswered(&missing),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Missions => {
            let view = app.navigate(Route::Missions.path());
            render_missions(&app.missions(), view)
        }
        Command::Complete { id } => {
            app.navigate(Route::Missions.path());
            if app.complete_mission(id)? {
                let state = app.load_feed().await;
                let user_id = current_user_id(app);
                format!(
                    "Mission {id} completed.\n\n{}",
                    render_feed(&state, user_id.as_deref())
                )
            } else {
                format!("Mission {id} is already completed.")
            }
        }
        Command::Feed { like } => {
            app.navigate(Route::Feed.path());
            app.load_feed().await;
            for id in like {
                app.toggle_like(id).await?;
            }
            let state = app.feed().snapshot().await;
            let user_id = current_user_id(app);
            render_feed(&state, user_id.as_deref())
        }
        Command::Profile => {
            app.navigate(Route::Profile.path());
            render_profile(app.profile().as_ref())
        }
        Command::User {
            command:
                UserCommand::Set {
                    id,
                    name,
                    email,
                    bio,
                },
        } => {
            let patch = UserPatch {
                id,
                name,
                email,
                bio,
                ..UserPatch::default()
            };
            app.update_profile(patch)?;
            app.navigate(Route::Profile.path());
            render_profile(app.profile().as_ref())
        }
        Command::Logout => {
            let view = app.logout();
            format!("Signed out.\n\n{}", render_session(None, view, Route::Entry.path()))
        }
    };
    Ok(out)
}

fn current_user_id(app: &App) -> Option<String> {
    app.session().get().and_then(|u| u.id.clone())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Bottom navigation bar with the active item bracketed.
pub fn render_nav(current_path: &str) -> String {
    NAV_ITEMS
        .iter()
        .map(|item| {
            if is_nav_active(item, current_path) {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_session(user: Option<&User>, view: View, current_path: &str) -> String {
    let mut out = format!("View: {}\n", view.label());
    match user {
        Some(user) => {
            let who = user.display_name().unwrap_or("anonymous");
            let _ = writeln!(out, "Signed in as {who}");
            let _ = writeln!(
                out,
                "Onboarding complete: {}",
                yes_no(user.onboarding_complete())
            );
            let _ = writeln!(
                out,
                "Purpose test complete: {}",
                yes_no(user.purpose_test_complete())
            );
        }
        None => out.push_str("Not signed in\n"),
    }
    if let Some(next) = view.next() {
        let _ = writeln!(out, "Next: {} ({})", next.label(), next.route().path());
    }
    out.push('\n');
    out.push_str(&render_nav(current_path));
    out
}

fn render_questions(view: View) -> String {
    let mut out = format!("{}\n", view.label());
    for (i, question) in QUESTIONS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {question}", i + 1);
    }
    out
}

pub fn render_unanswered(missing: &[usize]) -> String {
    let numbers: Vec<String> = missing.iter().map(|i| (i + 1).to_string()).collect();
    format!(
        "Please answer all questions (missing: {}).",
        numbers.join(", ")
    )
}

pub fn render_missions(cards: &[MissionCard], view: View) -> String {
    let mut out = format!("{}\n", view.label());
    for card in cards {
        let mark = if card.completed { "x" } else { " " };
        let _ = writeln!(
            out,
            "[{mark}] {}. {}  ({})",
            card.mission.id,
            card.mission.title,
            card.mission.tags.join(", ")
        );
        let _ = writeln!(out, "      {}", card.mission.description);
    }
    out.push('\n');
    out.push_str(&render_nav(view.route().path()));
    out
}

pub fn render_feed(state: &FeedState, current_user_id: Option<&str>) -> String {
    let mut out = String::from("Feed\n");
    if state.is_loading() {
        out.push_str("Loading...\n");
    } else if let Some(message) = state.error() {
        let _ = writeln!(out, "{message}");
    } else if state.is_empty_feed() {
        out.push_str("No posts yet.\n");
    } else {
        for post in state.posts() {
            out.push_str(&render_post(post, current_user_id));
        }
    }
    out.push('\n');
    out.push_str(&render_nav(Route::Feed.path()));
    out
}

fn render_post(post: &FeedPost, current_user_id: Option<&str>) -> String {
    let heart = if post.liked_by_current_user { "♥" } else { "♡" };
    let when = post
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!(
        "#{} {} {when}\n  {}\n  {heart} {}\n",
        post.id,
        post.author_label(current_user_id),
        post.content,
        post.likes_label()
    )
}

pub fn render_profile(profile: Option<&ProfileView>) -> String {
    let Some(profile) = profile else {
        return format!(
            "You're not logged in.\n\n{}",
            render_nav(Route::Profile.path())
        );
    };

    let mut out = String::from("Profile\n");
    let _ = writeln!(out, "Name: {}", profile.name);
    let _ = writeln!(out, "Email: {}", profile.email);
    let _ = writeln!(out, "Bio: {}", profile.bio);
    out.push_str("Missions completed:\n");
    if profile.missions_completed.is_empty() {
        out.push_str("  none yet\n");
    }
    for title in &profile.missions_completed {
        let _ = writeln!(out, "  - {title}");
    }
    let _ = writeln!(out, "Purpose insight: {}", profile.purpose_insight_text());
    out.push('\n');
    out.push_str(&render_nav(Route::Profile.path()));
    out
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
