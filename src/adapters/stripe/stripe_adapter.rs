//! Stripe checkout adapter.
//!
//! Implements `CheckoutProvider` with one-time `mode=payment` Checkout
//! Sessions and Stripe webhook verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) against replays
//! - Secrets held in `secrecy::SecretString`

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{
    CheckoutProvider, CheckoutRequest, CheckoutSession, PaymentError, PaymentErrorCode,
    PaymentEvent,
};

use super::webhook_types::{
    CreatedCheckoutSession, SignatureHeader, StripeErrorResponse, StripeEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps.
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,
    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: SecretString, webhook_secret: SecretString) -> Self {
        Self {
            api_key,
            webhook_secret,
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Points the adapter at a different API host (stripe-mock, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

pub struct StripeCheckoutAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
        now: i64,
    ) -> Result<(), PaymentError> {
        let age = now - header.timestamp;
        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                age_secs = age,
                "webhook event too old"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }
        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(event_timestamp = header.timestamp, "webhook event from the future");
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        let mut mac =
            HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
                .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        let matched = header
            .v1_signatures
            .iter()
            .any(|provided| bool::from(expected.as_slice().ct_eq(provided.as_slice())));
        if !matched {
            tracing::warn!("invalid webhook signature");
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }
        Ok(())
    }

    async fn provider_error(response: reqwest::Response) -> PaymentError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let code = if status == reqwest::StatusCode::UNAUTHORIZED {
            PaymentErrorCode::AuthenticationError
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            PaymentErrorCode::RateLimitExceeded
        } else if status.is_client_error() {
            PaymentErrorCode::InvalidRequest
        } else {
            PaymentErrorCode::ProviderError
        };

        match serde_json::from_str::<StripeErrorResponse>(&body) {
            Ok(parsed) => {
                let error = PaymentError::new(code, parsed.error.message);
                match parsed.error.code {
                    Some(provider_code) => error.with_provider_code(provider_code),
                    None => error.with_provider_code(parsed.error.error_type),
                }
            }
            Err(_) => PaymentError::new(code, format!("Stripe API error ({}): {}", status, body)),
        }
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutAdapter {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        if request.amount <= 0 {
            return Err(PaymentError::invalid_request("Amount must be positive"));
        }
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = [
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("customer_email", request.customer_email.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", request.currency),
            (
                "line_items[0][price_data][unit_amount]",
                request.amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                request.display_name,
            ),
            ("metadata[userEmail]", request.customer_email.to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let session: CreatedCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;
        let url = session.url.ok_or_else(|| {
            PaymentError::provider(format!("Checkout session {} has no URL", session.id))
        })?;

        tracing::info!(session_id = %session.id, "checkout session created");
        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<PaymentEvent, PaymentError> {
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        self.verify_signature(payload, &header, chrono::Utc::now().timestamp())?;

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_webhook(format!("Malformed event: {}", e)))?;
        let event = event.into_payment_event();

        tracing::info!(event_id = %event.id, "webhook signature verified");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::webhook_types::hex_encode;
    use crate::ports::PaymentEventKind;

    const SECRET: &str = "whsec_test_secret";

    fn adapter() -> StripeCheckoutAdapter {
        StripeCheckoutAdapter::new(StripeConfig::new(
            SecretString::new("sk_test_key".to_string()),
            SecretString::new(SECRET.to_string()),
        ))
    }

    fn sign(secret: &str, timestamp: i64, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}.{}", timestamp, payload).as_bytes());
        format!("t={},v1={}", timestamp, hex_encode(&mac.finalize().into_bytes()))
    }

    fn header(raw: &str) -> SignatureHeader {
        SignatureHeader::parse(raw).unwrap()
    }

    #[test]
    fn config_defaults_to_live_api() {
        let config = StripeConfig::new(
            SecretString::new("k".to_string()),
            SecretString::new("s".to_string()),
        );
        assert_eq!(config.api_base_url, "https://api.stripe.com");
        assert_eq!(
            config.with_base_url("http://localhost:12111").api_base_url,
            "http://localhost:12111"
        );
    }

    #[test]
    fn verify_signature_valid() {
        let now = 1_704_067_200;
        let payload = r#"{"id":"evt_1"}"#;
        let result = adapter().verify_signature(
            payload.as_bytes(),
            &header(&sign(SECRET, now, payload)),
            now,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn verify_signature_wrong_secret() {
        let now = 1_704_067_200;
        let payload = r#"{"id":"evt_1"}"#;
        let err = adapter()
            .verify_signature(
                payload.as_bytes(),
                &header(&sign("whsec_other", now, payload)),
                now,
            )
            .unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[test]
    fn verify_signature_tampered_payload() {
        let now = 1_704_067_200;
        let signed = sign(SECRET, now, r#"{"amount":1}"#);
        let err = adapter()
            .verify_signature(br#"{"amount":9}"#, &header(&signed), now)
            .unwrap_err();
        assert_eq!(err.message, "Invalid signature");
    }

    #[test]
    fn verify_signature_expired_timestamp() {
        let now = 1_704_067_200;
        let payload = "{}";
        let signed = sign(SECRET, now - 301, payload);
        let err = adapter()
            .verify_signature(payload.as_bytes(), &header(&signed), now)
            .unwrap_err();
        assert!(err.message.contains("too old"));
    }

    #[test]
    fn verify_signature_future_timestamp() {
        let now = 1_704_067_200;
        let payload = "{}";
        let far = sign(SECRET, now + 120, payload);
        let near = sign(SECRET, now + 30, payload);
        assert!(adapter()
            .verify_signature(payload.as_bytes(), &header(&far), now)
            .is_err());
        assert!(adapter()
            .verify_signature(payload.as_bytes(), &header(&near), now)
            .is_ok());
    }

    #[tokio::test]
    async fn verify_webhook_valid_signature_and_payload() {
        let now = chrono::Utc::now().timestamp();
        let payload = r#"{
            "id": "evt_ok",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {"object": {"id": "cs_1", "customer_email": "a@x.com", "payment_status": "paid"}}
        }"#;

        let event = adapter()
            .verify_webhook(payload.as_bytes(), &sign(SECRET, now, payload))
            .await
            .unwrap();

        assert_eq!(event.id, "evt_ok");
        assert!(matches!(
            event.kind,
            PaymentEventKind::CheckoutCompleted { paid: true, .. }
        ));
    }

    #[tokio::test]
    async fn verify_webhook_rejects_malformed_header() {
        let err = adapter().verify_webhook(b"{}", "garbage").await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_invalid_json() {
        let now = chrono::Utc::now().timestamp();
        let payload = "not json";
        let err = adapter()
            .verify_webhook(payload.as_bytes(), &sign(SECRET, now, payload))
            .await
            .unwrap_err();
        assert!(err.message.starts_with("Malformed event"));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected_before_calling_stripe() {
        let request = CheckoutRequest {
            amount: 0,
            currency: "usd".to_string(),
            display_name: "Premium".to_string(),
            customer_email: crate::domain::foundation::Email::new("a@x.com").unwrap(),
            success_url: "http://x/ok".to_string(),
            cancel_url: "http://x/no".to_string(),
        };
        let err = adapter().create_checkout_session(request).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
    }
}
