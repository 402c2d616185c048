//! Static mission templates.
//!
//! Missions are defined by the application and never created by users.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::MissionId;

/// An immutable mission template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mission {
    pub id: MissionId,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const MISSIONS: &[Mission] = &[
    Mission {
        id: 1,
        title: "Launch a Mini Project",
        description: "Create something small but real that aligns with your purpose. \
                      Could be a blog, app, or art piece.",
        tags: &["creator", "starter", "solo"],
    },
    Mission {
        id: 2,
        title: "Interview Someone Inspiring",
        description: "Talk to someone doing work aligned with your purpose. \
                      Record your key takeaways.",
        tags: &["network", "discovery", "mentor"],
    },
    Mission {
        id: 3,
        title: "Volunteer in Your Area",
        description: "Find a local group aligned with your mission. \
                      Spend a day contributing meaningfully.",
        tags: &["action", "local", "impact"],
    },
    Mission {
        id: 4,
        title: "Design Your Dream Role",
        description: "Write a job description for the role you'd love to play in the world.",
        tags: &["clarity", "career", "vision"],
    },
];

/// All mission templates in display order.
pub fn catalog() -> &'static [Mission] {
    MISSIONS
}

/// Look up a mission template by id.
pub fn find(id: MissionId) -> Result<&'static Mission, CoreError> {
    MISSIONS
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Mission",
            id: id.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
