//! HTTP handlers for favorite endpoints. All act as the principal.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{AddFavoriteCommand, RemoveFavoriteCommand};
use crate::domain::foundation::LessonId;

use super::dto::{AddFavoriteRequest, AddFavoriteResponse, FavoriteStatusResponse};

/// POST /favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    ApiJson(body): ApiJson<AddFavoriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AddFavoriteCommand {
        principal,
        lesson_id: LessonId::parse(&body.lesson_id)?,
    };
    let response = AddFavoriteResponse::from(state.add_favorite_handler().handle(cmd).await?);
    let status = if response.inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// GET /favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let favorites = state.favorite_queries().list(&principal.email).await?;
    Ok(Json(favorites))
}

/// GET /favorites/:lessonId
pub async fn favorite_status(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(lesson_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let lesson_id = LessonId::parse(&lesson_id)?;
    let favorited = state
        .favorite_queries()
        .is_favorited(&principal.email, &lesson_id)
        .await?;
    Ok(Json(FavoriteStatusResponse { favorited }))
}

/// DELETE /favorites/:lessonId
pub async fn remove_favorite(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(lesson_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RemoveFavoriteCommand {
        principal,
        lesson_id: LessonId::parse(&lesson_id)?,
    };
    state.remove_favorite_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
