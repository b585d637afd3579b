//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what the identity verifier hands back for a
//! valid bearer token. Every ownership and identity decision downstream is
//! made against this principal, never against an email supplied in a
//! request body or query string.

use super::Email;
use thiserror::Error;

/// Verified principal extracted from an ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Verified email address; the key users are stored under.
    pub email: Email,

    /// Display name from the `name` claim, if present.
    pub display_name: Option<String>,

    /// Profile picture URL from the `picture` claim, if present.
    pub picture: Option<String>,

    /// Whether the identity provider has verified the address.
    pub email_verified: bool,
}

impl AuthenticatedUser {
    pub fn new(email: Email, display_name: Option<String>, email_verified: bool) -> Self {
        Self {
            email,
            display_name,
            picture: None,
            email_verified,
        }
    }

    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.email.as_str())
    }
}

/// Authentication errors that can occur during token verification.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The token verified but carries no usable email claim.
    #[error("Token has no email claim")]
    MissingEmail,

    /// The identity service is unavailable (network, JWKS fetch, config).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::MissingEmail
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(raw: &str) -> Email {
        Email::new(raw).unwrap()
    }

    #[test]
    fn display_name_or_email_prefers_name() {
        let user = AuthenticatedUser::new(email("a@x.com"), Some("Alice".to_string()), true);
        assert_eq!(user.display_name_or_email(), "Alice");
    }

    #[test]
    fn display_name_or_email_falls_back_to_email() {
        let user = AuthenticatedUser::new(email("b@y.com"), None, false);
        assert_eq!(user.display_name_or_email(), "b@y.com");
    }

    #[test]
    fn with_picture_sets_picture() {
        let user = AuthenticatedUser::new(email("a@x.com"), None, true)
            .with_picture("https://img.example/a.png");
        assert_eq!(user.picture.as_deref(), Some("https://img.example/a.png"));
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::MissingEmail.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
    }
}
