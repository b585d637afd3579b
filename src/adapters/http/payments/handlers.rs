//! HTTP handlers for payment endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::OptionalJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{CreateCheckoutCommand, PaymentWebhookCommand};
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{CheckoutRequestBody, CheckoutResponse, WebhookAck};

/// POST /create-checkout-session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    OptionalJson(body): OptionalJson<CheckoutRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.unwrap_or_default();
    let session = state
        .create_checkout_handler()
        .handle(CreateCheckoutCommand {
            principal,
            amount: body.amount,
            display_name: body.display_name,
        })
        .await?;
    Ok(Json(CheckoutResponse::from(session)))
}

/// POST /webhooks/stripe
///
/// Authenticated by the `Stripe-Signature` header, not a bearer token. The
/// raw body is passed through untouched because the signature covers it.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            DomainError::new(ErrorCode::InvalidWebhook, "Missing Stripe-Signature header")
        })?;

    let result = state
        .payment_webhook_handler()
        .handle(PaymentWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;
    Ok(Json(WebhookAck::from(result)))
}
