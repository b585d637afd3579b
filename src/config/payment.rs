//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::adapters::stripe::StripeConfig;
use crate::application::handlers::CheckoutSettings;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: Option<SecretString>,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: Option<SecretString>,

    /// Overrides the Stripe API host (stripe-mock)
    pub stripe_api_base_url: Option<String>,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Charged when the client sends no amount
    #[serde(default = "default_premium_price")]
    pub premium_price_cents: i64,

    #[serde(default = "default_product_name")]
    pub product_name: String,

    #[serde(default = "default_success_url")]
    pub success_url_template: String,

    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key
            .as_ref()
            .is_some_and(|k| k.expose_secret().starts_with("sk_test_"))
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            currency: self.currency.clone(),
            premium_price_cents: self.premium_price_cents,
            product_name: self.product_name.clone(),
            success_url_template: self.success_url_template.clone(),
            cancel_url: self.cancel_url.clone(),
        }
    }

    pub fn stripe(&self) -> Result<StripeConfig, ValidationError> {
        let api_key = self
            .stripe_api_key
            .clone()
            .ok_or(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"))?;
        let webhook_secret = self
            .stripe_webhook_secret
            .clone()
            .ok_or(ValidationError::MissingRequired("PAYMENT__STRIPE_WEBHOOK_SECRET"))?;

        let config = StripeConfig::new(api_key, webhook_secret);
        Ok(match &self.stripe_api_base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self
            .stripe_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .unwrap_or_default();
        let webhook_secret = self
            .stripe_webhook_secret
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .unwrap_or_default();

        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.premium_price_cents <= 0 {
            return Err(ValidationError::InvalidPrice);
        }
        if !self.success_url_template.contains("{CHECKOUT_SESSION_ID}") {
            return Err(ValidationError::MissingSessionPlaceholder);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: None,
            stripe_webhook_secret: None,
            stripe_api_base_url: None,
            currency: default_currency(),
            premium_price_cents: default_premium_price(),
            product_name: default_product_name(),
            success_url_template: default_success_url(),
            cancel_url: default_cancel_url(),
        }
    }
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_premium_price() -> i64 {
    1500
}

fn default_product_name() -> String {
    "Lesson Hub Premium".to_string()
}

fn default_success_url() -> String {
    "http://localhost:5173/payment/success?session_id={CHECKOUT_SESSION_ID}".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:5173/payment/cancel".to_string()
}
