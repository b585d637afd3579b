//! Email address value object.
//!
//! Emails are the natural key for users and the principal identifier
//! returned by the identity verifier, so comparisons must be stable:
//! addresses are trimmed and lowercased on construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a normalized email, rejecting blank or malformed input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let normalized = raw.into().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(ValidationError::invalid_format(
                    "email",
                    "expected local@domain",
                ))
            }
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "email",
                "must not contain whitespace",
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
