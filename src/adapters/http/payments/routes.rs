//! Payment routes.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{create_checkout_session, stripe_webhook};

/// # Routes
///
/// - `POST /create-checkout-session` - hosted checkout for the principal
/// - `POST /webhooks/stripe` - signature-verified provider callbacks
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/webhooks/stripe", post(stripe_webhook))
}
