//! PaymentWebhookHandler - verified provider callbacks.
//!
//! Only provider failures to verify and storage failures are errors; the
//! provider redelivers on anything but a 2xx. Events that verify but cannot
//! grant anything are acknowledged as `Ignored`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::consistency::RECONCILE_TARGET;
use crate::application::handlers::user::apply_premium;
use crate::domain::foundation::{DomainError, Email, ErrorCode};
use crate::ports::{CheckoutProvider, PaymentEventKind, UserRepository};

#[derive(Debug, Clone)]
pub struct PaymentWebhookCommand {
    pub payload: Vec<u8>,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentWebhookResult {
    /// A paid checkout granted premium to this account.
    PremiumGranted { email: Email },
    /// Verified, but nothing to do.
    Ignored,
}

pub struct PaymentWebhookHandler {
    provider: Arc<dyn CheckoutProvider>,
    users: Arc<dyn UserRepository>,
    premium_price_cents: i64,
}

impl PaymentWebhookHandler {
    pub fn new(
        provider: Arc<dyn CheckoutProvider>,
        users: Arc<dyn UserRepository>,
        premium_price_cents: i64,
    ) -> Self {
        Self {
            provider,
            users,
            premium_price_cents,
        }
    }

    pub async fn handle(&self, cmd: PaymentWebhookCommand) -> Result<PaymentWebhookResult, DomainError> {
        let event = self
            .provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await?;

        let (session_id, customer_email, amount_total) = match event.kind {
            PaymentEventKind::CheckoutCompleted {
                session_id,
                customer_email,
                paid,
                amount_total,
            } => {
                if !paid {
                    info!(event_id = %event.id, session_id = %session_id, "checkout completed unpaid");
                    return Ok(PaymentWebhookResult::Ignored);
                }
                (session_id, customer_email, amount_total)
            }
            PaymentEventKind::Other(kind) => {
                info!(event_id = %event.id, kind = %kind, "webhook event ignored");
                return Ok(PaymentWebhookResult::Ignored);
            }
        };

        let charged = amount_total.unwrap_or(0);
        if charged < self.premium_price_cents {
            warn!(
                event_id = %event.id,
                session_id = %session_id,
                charged,
                price = self.premium_price_cents,
                "paid checkout below premium price"
            );
            return Ok(PaymentWebhookResult::Ignored);
        }

        let Some(email) = customer_email.and_then(|raw| Email::new(&raw).ok()) else {
            warn!(event_id = %event.id, session_id = %session_id, "paid checkout without usable email");
            return Ok(PaymentWebhookResult::Ignored);
        };

        match apply_premium(self.users.as_ref(), &email, true).await {
            Ok(_) => {
                info!(event_id = %event.id, session_id = %session_id, email = %email, "premium granted by payment");
                Ok(PaymentWebhookResult::PremiumGranted { email })
            }
            Err(err) if err.code == ErrorCode::UserNotFound => {
                warn!(
                    target: RECONCILE_TARGET,
                    event_id = %event.id,
                    session_id = %session_id,
                    entity = %email,
                    "paid checkout for unknown account, premium not granted"
                );
                Ok(PaymentWebhookResult::Ignored)
            }
            Err(err) => Err(err),
        }
    }
}
