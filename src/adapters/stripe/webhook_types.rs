//! Stripe wire types: the signature header and the event envelope.
//!
//! Only the fields the premium flow reads are modelled; everything else in
//! the payload is ignored by serde.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::ports::{PaymentEvent, PaymentEventKind};

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureParseError {
    #[error("Missing Stripe-Signature header")]
    MissingHeader,
    #[error("Missing timestamp (t=) in signature")]
    MissingTimestamp,
    #[error("Missing v1 signature in header")]
    MissingV1Signature,
    #[error("Invalid timestamp format")]
    InvalidTimestamp,
    #[error("Invalid signature format (not valid hex)")]
    InvalidSignatureFormat,
}

/// Parsed `t=<unix>,v1=<hex>[,v1=<hex>...]` header.
///
/// Stripe sends several `v1` entries while a signing secret is being
/// rolled; any one of them may match.
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.trim().is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse::<i64>()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => v1_signatures.push(
                    hex_decode(value.trim()).ok_or(SignatureParseError::InvalidSignatureFormat)?,
                ),
                // v0 and future schemes
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureParseError::MissingTimestamp)?;
        if v1_signatures.is_empty() {
            return Err(SignatureParseError::MissingV1Signature);
        }
        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| hex.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

#[cfg(test)]
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Event envelope as delivered to the webhook endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub created: i64,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

/// The subset of a Checkout Session the premium grant needs.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_details: Option<StripeCustomerDetails>,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomerDetails {
    pub email: Option<String>,
}

impl StripeCheckoutSession {
    /// Email the buyer paid with. Falls back to `customer_details` and then
    /// to the `userEmail` metadata we attach when creating the session.
    pub fn buyer_email(&self) -> Option<String> {
        self.customer_email
            .clone()
            .or_else(|| self.customer_details.as_ref().and_then(|d| d.email.clone()))
            .or_else(|| self.metadata.get("userEmail").cloned())
    }
}

/// Response body of `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// Error body returned by the Stripe API.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    #[serde(rename = "type", default)]
    pub error_type: String,
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl StripeEvent {
    /// Maps the envelope onto the provider-neutral event.
    pub fn into_payment_event(self) -> PaymentEvent {
        let kind = match self.event_type.as_str() {
            "checkout.session.completed" => {
                match serde_json::from_value::<StripeCheckoutSession>(self.data.object) {
                    Ok(session) => PaymentEventKind::CheckoutCompleted {
                        customer_email: session.buyer_email(),
                        paid: session.payment_status == "paid",
                        amount_total: session.amount_total,
                        session_id: session.id,
                    },
                    Err(_) => PaymentEventKind::Other(self.event_type.clone()),
                }
            }
            _ => PaymentEventKind::Other(self.event_type.clone()),
        };

        PaymentEvent {
            id: self.id,
            kind,
            created_at: self.created,
        }
    }
}
