//! Payment handlers.

mod create_checkout;
mod payment_webhook;

pub use create_checkout::{
    CheckoutSettings, CreateCheckoutCommand, CreateCheckoutHandler, SESSION_ID_PLACEHOLDER,
};
pub use payment_webhook::{PaymentWebhookCommand, PaymentWebhookHandler, PaymentWebhookResult};
