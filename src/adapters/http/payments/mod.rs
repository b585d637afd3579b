//! HTTP adapter for premium checkout and the Stripe webhook.

mod dto;
mod handlers;
mod routes;

pub use dto::{CheckoutRequestBody, CheckoutResponse, WebhookAck};
pub use routes::payment_routes;
