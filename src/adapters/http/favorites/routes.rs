//! Favorite routes.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{add_favorite, favorite_status, list_favorites, remove_favorite};

/// # Routes
///
/// - `POST /favorites` - save `{lessonId}`; repeat saves answer `inserted: false`
/// - `GET /favorites` - the principal's saved lessons, newest first
/// - `GET /favorites/:lessonId` - `{favorited}`
/// - `DELETE /favorites/:lessonId` - unsave
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route(
            "/favorites/:lesson_id",
            get(favorite_status).delete(remove_favorite),
        )
}
