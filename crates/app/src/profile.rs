//! Profile view model.

use applica_core::completion::CompletionSet;
use applica_core::mission;
use applica_core::user::User;

pub const NOT_PROVIDED: &str = "Not provided";
pub const NO_BIO: &str = "No bio added yet.";
pub const NO_PURPOSE: &str = "You haven't taken the purpose test yet.";

/// Everything the profile view shows for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub bio: String,
    /// Titles of completed missions, in completion order.
    pub missions_completed: Vec<String>,
    /// The stored purpose summary, if the test has been taken.
    pub purpose_insight: Option<String>,
}

impl ProfileView {
    pub fn build(user: &User, completed: &CompletionSet) -> Self {
        let missions_completed = completed
            .iter()
            .map(|id| match mission::find(id) {
                Ok(m) => m.title.to_string(),
                Err(_) => format!("Mission {id}"),
            })
            .collect();

        Self {
            name: or_fallback(user.name.as_deref(), NOT_PROVIDED),
            email: or_fallback(user.email.as_deref(), NOT_PROVIDED),
            bio: or_fallback(user.bio.as_deref(), NO_BIO),
            missions_completed,
            purpose_insight: user
                .purpose_summary
                .clone()
                .filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn purpose_insight_text(&self) -> &str {
        self.purpose_insight.as_deref().unwrap_or(NO_PURPOSE)
    }
}

fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use applica_core::user::UserPatch;

    use super::*;

    #[test]
    fn empty_user_gets_fallbacks() {
        let view = ProfileView::build(&User::default(), &CompletionSet::new());
        assert_eq!(view.name, NOT_PROVIDED);
        assert_eq!(view.email, NOT_PROVIDED);
        assert_eq!(view.bio, NO_BIO);
        assert!(view.missions_completed.is_empty());
        assert_eq!(view.purpose_insight_text(), NO_PURPOSE);
    }

    #[test]
    fn completed_missions_use_titles() {
        let user = User::from_patch(UserPatch {
            name: Some("Kai".to_string()),
            purpose_summary: Some("a | b | c | d".to_string()),
            ..UserPatch::default()
        });
        let view = ProfileView::build(&user, &CompletionSet::from(vec![3, 1, 77]));

        assert_eq!(view.name, "Kai");
        assert_eq!(
            view.missions_completed,
            vec!["Volunteer in Your Area", "Launch a Mini Project", "Mission 77"]
        );
        assert_eq!(view.purpose_insight_text(), "a | b | c | d");
    }
}
