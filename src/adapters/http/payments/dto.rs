//! Request and response bodies for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::PaymentWebhookResult;
use crate::ports::CheckoutSession;

/// `POST /create-checkout-session` body. Both fields fall back to the
/// configured premium product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestBody {
    /// Smallest currency unit (cents).
    pub amount: Option<i64>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub id: String,
    pub url: String,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            id: session.id,
            url: session.url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    /// True when the event granted premium.
    pub applied: bool,
}

impl From<PaymentWebhookResult> for WebhookAck {
    fn from(result: PaymentWebhookResult) -> Self {
        Self {
            received: true,
            applied: matches!(result, PaymentWebhookResult::PremiumGranted { .. }),
        }
    }
}
