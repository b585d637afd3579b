//! Lesson routes.

use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_lesson, delete_lesson, get_lesson, list_lessons, my_lessons, toggle_like,
    update_lesson,
};

/// # Routes
///
/// - `GET /lessons` - public listing with equality filters
/// - `POST /lessons` - create as the principal
/// - `GET /lessons/:id` - one lesson
/// - `PATCH /lessons/:id` - owner edit of whitelisted fields
/// - `PATCH /lessons/:id/like` - toggle the principal's like
/// - `GET /my-lessons` - the principal's lessons
/// - `DELETE /my-lessons/:id` - owner or admin delete
pub fn lesson_routes() -> Router<AppState> {
    Router::new()
        .route("/lessons", get(list_lessons).post(create_lesson))
        .route("/lessons/:id", get(get_lesson).patch(update_lesson))
        .route("/lessons/:id/like", patch(toggle_like))
        .route("/my-lessons", get(my_lessons))
        .route("/my-lessons/:id", delete(delete_lesson))
}
