//! CreateCheckoutHandler - hosted checkout for the premium upgrade.
//!
//! Creating a session never changes premium status. The grant happens
//! on a verified completion event (see `payment_webhook`) or through the
//! explicit premium routes.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ValidationError};
use crate::ports::{CheckoutProvider, CheckoutRequest, CheckoutSession};

/// Placeholder Stripe replaces with the session id in the success URL.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Checkout parameters that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub currency: String,
    /// Default charge, and the least a client-chosen amount may be.
    pub premium_price_cents: i64,
    pub product_name: String,
    pub success_url_template: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub principal: AuthenticatedUser,
    /// Amount in cents.
    pub amount: Option<i64>,
    pub display_name: Option<String>,
}

pub struct CreateCheckoutHandler {
    provider: Arc<dyn CheckoutProvider>,
    settings: CheckoutSettings,
}

impl CreateCheckoutHandler {
    pub fn new(provider: Arc<dyn CheckoutProvider>, settings: CheckoutSettings) -> Self {
        Self { provider, settings }
    }

    pub async fn handle(&self, cmd: CreateCheckoutCommand) -> Result<CheckoutSession, DomainError> {
        let price = self.settings.premium_price_cents;
        let amount = cmd.amount.unwrap_or(price);
        if amount < price {
            return Err(ValidationError::out_of_range("amount", price, i64::MAX, amount).into());
        }
        let display_name = cmd
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.settings.product_name.clone());

        let session = self
            .provider
            .create_checkout_session(CheckoutRequest {
                amount,
                currency: self.settings.currency.clone(),
                display_name,
                customer_email: cmd.principal.email.clone(),
                success_url: self.settings.success_url_template.clone(),
                cancel_url: self.settings.cancel_url.clone(),
            })
            .await?;

        info!(session_id = %session.id, email = %cmd.principal.email, amount, "checkout started");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockCheckoutProvider;
    use crate::application::handlers::test_support::principal;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::PaymentError;

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            currency: "usd".to_string(),
            premium_price_cents: 1500,
            product_name: "Premium Membership".to_string(),
            success_url_template: format!(
                "http://localhost:5173/payment/success?session_id={}",
                SESSION_ID_PLACEHOLDER
            ),
            cancel_url: "http://localhost:5173/payment/cancel".to_string(),
        }
    }

    fn cmd(amount: Option<i64>, display_name: Option<&str>) -> CreateCheckoutCommand {
        CreateCheckoutCommand {
            principal: principal("a@x.com"),
            amount,
            display_name: display_name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn defaults_come_from_settings() {
        let mock = MockCheckoutProvider::new();
        let handler = CreateCheckoutHandler::new(Arc::new(mock.clone()), settings());

        let session = handler.handle(cmd(None, None)).await.unwrap();

        assert!(session.url.contains(&session.id));
        let sent = &mock.requests()[0];
        assert_eq!(sent.amount, 1500);
        assert_eq!(sent.display_name, "Premium Membership");
        assert_eq!(sent.customer_email.as_str(), "a@x.com");
        assert!(sent.success_url.contains(SESSION_ID_PLACEHOLDER));
    }

    #[tokio::test]
    async fn client_amount_and_name_override_defaults() {
        let mock = MockCheckoutProvider::new();
        let handler = CreateCheckoutHandler::new(Arc::new(mock.clone()), settings());

        handler.handle(cmd(Some(2500), Some("Lifetime"))).await.unwrap();

        let sent = &mock.requests()[0];
        assert_eq!(sent.amount, 2500);
        assert_eq!(sent.display_name, "Lifetime");
    }

    #[tokio::test]
    async fn amount_below_premium_price_is_invalid() {
        let mock = MockCheckoutProvider::new();
        let handler = CreateCheckoutHandler::new(Arc::new(mock.clone()), settings());

        for amount in [0, 1, 1499] {
            let err = handler.handle(cmd(Some(amount), None)).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
        }
        assert_eq!(mock.call_count("create_checkout_session"), 0);
    }

    #[tokio::test]
    async fn provider_failure_maps_to_payment_error() {
        let mock = MockCheckoutProvider::new();
        mock.set_method_error("create_checkout_session", PaymentError::network("down"));
        let handler = CreateCheckoutHandler::new(Arc::new(mock), settings());

        let err = handler.handle(cmd(None, None)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentProviderError);
    }
}
