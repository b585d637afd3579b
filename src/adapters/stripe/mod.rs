//! Stripe adapter - Checkout Sessions and webhook verification.
//!
//! - `StripeCheckoutAdapter` - production `CheckoutProvider`
//! - `MockCheckoutProvider` - in-process double for tests and local runs

mod mock_checkout_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_checkout_provider::{MockCheckoutProvider, MOCK_PREMIUM_PRICE_CENTS};
pub use stripe_adapter::{StripeCheckoutAdapter, StripeConfig};
pub use webhook_types::{SignatureHeader, SignatureParseError};
