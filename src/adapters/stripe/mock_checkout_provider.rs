//! Mock checkout provider for tests and local runs.
//!
//! Supports:
//! - a pre-configured next session
//! - error injection per method
//! - call tracking
//! - webhook events parsed straight from the payload (no signature check)

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{
    CheckoutProvider, CheckoutRequest, CheckoutSession, PaymentError, PaymentEvent,
};

use super::webhook_types::StripeEvent;

/// Amount the canned completion payloads report as charged.
pub const MOCK_PREMIUM_PRICE_CENTS: i64 = 1500;

#[derive(Default, Clone)]
pub struct MockCheckoutProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_checkout: Option<CheckoutSession>,
    method_errors: HashMap<String, PaymentError>,
    reject_webhooks: bool,
    requests: Vec<CheckoutRequest>,
    call_log: Vec<String>,
}

impl MockCheckoutProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that fails every webhook verification.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.state().reject_webhooks = true;
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.state().next_checkout = Some(session);
    }

    /// Makes every call to `method` fail with `error`.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    /// Checkout requests received so far.
    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.state().requests.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state().call_log.iter().filter(|c| *c == method).count()
    }

    fn record(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.state();
        state.call_log.push(method.to_string());
        match state.method_errors.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// A `checkout.session.completed` payload charging [`MOCK_PREMIUM_PRICE_CENTS`].
    pub fn checkout_completed_payload(email: &str, paid: bool) -> Vec<u8> {
        Self::checkout_completed_payload_with_amount(email, paid, MOCK_PREMIUM_PRICE_CENTS)
    }

    /// A `checkout.session.completed` payload as the provider would send it.
    pub fn checkout_completed_payload_with_amount(
        email: &str,
        paid: bool,
        amount_total: i64,
    ) -> Vec<u8> {
        let payment_status = if paid { "paid" } else { "unpaid" };
        serde_json::json!({
            "id": format!("evt_mock_{}", uuid::Uuid::new_v4().simple()),
            "type": "checkout.session.completed",
            "created": chrono::Utc::now().timestamp(),
            "data": {
                "object": {
                    "id": format!("cs_mock_{}", uuid::Uuid::new_v4().simple()),
                    "customer_email": email,
                    "payment_status": payment_status,
                    "amount_total": amount_total,
                }
            }
        })
        .to_string()
        .into_bytes()
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record("create_checkout_session")?;

        let mut state = self.state();
        state.requests.push(request);
        let session = state.next_checkout.take().unwrap_or_else(|| {
            let id = format!("cs_mock_{}", uuid::Uuid::new_v4().simple());
            CheckoutSession {
                url: format!("https://checkout.stripe.com/c/pay/{}", id),
                id,
            }
        });
        Ok(session)
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        _signature: &str,
    ) -> Result<PaymentEvent, PaymentError> {
        self.record("verify_webhook")?;
        if self.state().reject_webhooks {
            return Err(PaymentError::invalid_webhook("Verification disabled"));
        }

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;
        Ok(event.into_payment_event())
    }
}
