//! Comment routes.

use axum::{
    routing::{delete, get},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{delete_comment, list_comments, post_comment};

/// # Routes
///
/// - `POST /comments` - post as the principal
/// - `GET /comments?lessonId=` - a lesson's comments, newest first
/// - `DELETE /comments/:id` - author only
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments).post(post_comment))
        .route("/comments/:id", delete(delete_comment))
}
