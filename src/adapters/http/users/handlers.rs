//! HTTP handlers for user endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::OptionalJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{PromoteToAdminCommand, SetPremiumCommand, UpsertUserCommand};
use crate::domain::foundation::{AuthenticatedUser, Email};
use crate::domain::user::User;

use super::dto::{SignInRequest, SignInResponse};

/// POST /users
pub async fn sign_in(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    OptionalJson(body): OptionalJson<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.unwrap_or_default();
    let outcome = state
        .upsert_user_handler()
        .handle(UpsertUserCommand {
            principal,
            name: body.name,
            photo_url: body.photo_url,
        })
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SignInResponse::from(outcome))))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.list_users_handler().handle(&principal).await?;
    Ok(Json(users))
}

/// GET /users/:email
pub async fn get_user(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::new(email)?;
    let user = state.get_user_handler().handle(&principal, &email).await?;
    Ok(Json(user))
}

/// PATCH /users/premium/:email
pub async fn grant_premium(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    set_premium(state, principal, email, true).await
}

/// PATCH /users/premium/cancel/:email
pub async fn cancel_premium(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    set_premium(state, principal, email, false).await
}

async fn set_premium(
    state: AppState,
    principal: AuthenticatedUser,
    email: String,
    value: bool,
) -> Result<Json<User>, ApiError> {
    let cmd = SetPremiumCommand {
        principal,
        target: Email::new(email)?,
        value,
    };
    let user = state.set_premium_handler().handle(cmd).await?;
    Ok(Json(user))
}

/// PATCH /users/update/admin/:email
pub async fn promote_to_admin(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = PromoteToAdminCommand {
        principal,
        target: Email::new(email)?,
    };
    let user = state.promote_to_admin_handler().handle(cmd).await?;
    Ok(Json(user))
}
