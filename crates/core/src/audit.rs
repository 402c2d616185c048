//! Audit event names and payload field names.
//!
//! Lives in `core` so the session, feed and app crates agree on the names
//! without depending on the sink implementations.

/// Known audit event names.
pub mod event_names {
    pub const ROUTE_CHANGE: &str = "route_change";
    pub const SCREEN_VIEW: &str = "screen_view";
    pub const ONBOARDING_COMPLETE: &str = "onboarding_complete";
    pub const PURPOSE_TEST_COMPLETE: &str = "purpose_test_complete";
    pub const MISSION_COMPLETE: &str = "mission_complete";
    pub const POST_LIKE: &str = "post_like";
    pub const SESSION_LOGOUT: &str = "session_logout";
}

/// Payload field names shared by several events.
pub mod fields {
    pub const PATH: &str = "path";
    pub const SCREEN: &str = "screen";
    pub const USER_ID: &str = "userId";
    pub const MISSION_ID: &str = "missionId";
    pub const POST_ID: &str = "postId";
    pub const LIKED: &str = "liked";
}

/// User id recorded when nobody is signed in or the user has no id.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Resolve the user id to attach to an audit payload.
pub fn actor_id(user_id: Option<&str>) -> &str {
    user_id.unwrap_or(ANONYMOUS_USER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_is_anonymous() {
        assert_eq!(actor_id(None), "anonymous");
        assert_eq!(actor_id(Some("u1")), "u1");
    }
}
