//! The signed-in user record and its merge-patch update.
//!
//! Every field is optional: a user built from a patch carries exactly the
//! fields that were patched, and absent fields are omitted from the stored
//! JSON. Absence of the whole record means "signed out".

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The current user as held by the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_test_complete: Option<bool>,
}

/// A partial update. Each `Some` field overwrites the user's field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_test_complete: Option<bool>,
}

impl UserPatch {
    /// Patch that marks onboarding as finished.
    pub fn onboarding_complete() -> Self {
        Self {
            onboarding_complete: Some(true),
            ..Self::default()
        }
    }

    /// Patch that stores a purpose summary and marks the test as taken.
    pub fn purpose_result(summary: impl Into<String>) -> Self {
        Self {
            purpose_summary: Some(summary.into()),
            purpose_test_complete: Some(true),
            ..Self::default()
        }
    }

    /// True when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl User {
    /// Build a user holding exactly the fields set in `patch`.
    pub fn from_patch(patch: UserPatch) -> Self {
        let mut user = Self::default();
        user.apply(patch);
        user
    }

    /// Merge `patch` into this user.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            id,
            name,
            email,
            bio,
            onboarding_complete,
            purpose_summary,
            purpose_test_complete,
        } = patch;

        merge(&mut self.id, id);
        merge(&mut self.name, name);
        merge(&mut self.email, email);
        merge(&mut self.bio, bio);
        merge(&mut self.onboarding_complete, onboarding_complete);
        merge(&mut self.purpose_summary, purpose_summary);
        merge(&mut self.purpose_test_complete, purpose_test_complete);
    }

    pub fn onboarding_complete(&self) -> bool {
        self.onboarding_complete.unwrap_or(false)
    }

    pub fn purpose_test_complete(&self) -> bool {
        self.purpose_test_complete.unwrap_or(false)
    }

    /// Name to show in chrome, falling back to the email address.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
    }
}

fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
    if let Some(v) = value {
        *slot = Some(v);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
