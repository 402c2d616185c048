//! Feed posts and like toggling.

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::types::{PostId, Timestamp};

/// A single post as delivered by the feed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: PostId,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub liked_by_current_user: bool,
}

impl FeedPost {
    /// Like the post if it is not liked, unlike it otherwise.
    pub fn toggle_like(&mut self) {
        if self.liked_by_current_user {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes = self.likes.saturating_add(1);
        }
        self.liked_by_current_user = !self.liked_by_current_user;
    }

    /// Author shown on the card: "You" for the current user's own posts.
    pub fn author_label(&self, current_user_id: Option<&str>) -> &str {
        match current_user_id {
            Some(id) if id == self.author => "You",
            _ => &self.author,
        }
    }

    pub fn likes_label(&self) -> String {
        if self.likes == 1 {
            "1 like".to_string()
        } else {
            format!("{} likes", self.likes)
        }
    }
}

/// The hard-coded posts served when no feed endpoint is configured.
pub fn sample_posts() -> Vec<FeedPost> {
    let at = |day: u32, hour: u32| {
        chrono::Utc
            .with_ymd_and_hms(2024, 5, day, hour, 0, 0)
            .single()
    };

    vec![
        FeedPost {
            id: 1,
            author: "Kai".to_string(),
            content: "Just pushed the first commit on a journaling app built around my \
                      core values. Feels aligned for once."
                .to_string(),
            created_at: at(3, 9),
            likes: 14,
            liked_by_current_user: false,
        },
        FeedPost {
            id: 2,
            author: "Sage".to_string(),
            content: "Spoke to a founder in the climate space, made me rethink what \
                      impact really means."
                .to_string(),
            created_at: at(4, 15),
            likes: 22,
            liked_by_current_user: false,
        },
        FeedPost {
            id: 3,
            author: "Rei".to_string(),
            content: "Helped out at a youth shelter. Small work, but it felt powerful. \
                      I'm changing."
                .to_string(),
            created_at: at(6, 18),
            likes: 30,
            liked_by_current_user: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
