pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /feed                                            feed posts (GET)
/// /*                                               JSON 404
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/feed", get(handlers::feed::list_posts))
        .fallback(handlers::feed::not_found)
}
