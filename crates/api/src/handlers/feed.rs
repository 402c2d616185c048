//! Handlers for the feed endpoint.

use axum::extract::State;
use axum::http::Uri;
use axum::Json;

use applica_core::error::CoreError;
use applica_core::feed::FeedPost;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/feed
// ---------------------------------------------------------------------------

/// Return every post as a bare JSON array, in feed order.
///
/// No pagination and no auth: the client fetches the whole list once.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<FeedPost>> {
    tracing::debug!(count = state.posts.len(), "Serving feed");
    Json(state.posts.as_ref().clone())
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Unknown `/api` paths answer with the standard JSON error body.
pub async fn not_found(uri: Uri) -> AppResult<()> {
    Err(AppError::Core(CoreError::NotFound {
        entity: "Route",
        id: uri.path().to_string(),
    }))
}
