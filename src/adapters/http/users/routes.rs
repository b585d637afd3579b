//! User routes.

use axum::{
    routing::{get, patch},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    cancel_premium, get_user, grant_premium, list_users, promote_to_admin, sign_in,
};

/// # Routes
///
/// - `POST /users` - create-or-touch the principal's account
/// - `GET /users` - all accounts (admin)
/// - `GET /users/:email` - one account (self or admin)
/// - `PATCH /users/premium/:email` - grant premium (self or admin)
/// - `PATCH /users/premium/cancel/:email` - revoke premium (self or admin)
/// - `PATCH /users/update/admin/:email` - promote to admin (admin)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(sign_in))
        .route("/users/:email", get(get_user))
        .route("/users/premium/:email", patch(grant_premium))
        .route("/users/premium/cancel/:email", patch(cancel_premium))
        .route("/users/update/admin/:email", patch(promote_to_admin))
}
