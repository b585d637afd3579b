//! Request and response bodies for user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::{UpsertOutcome, User};

/// `POST /users` body. The email always comes from the token; these only
/// fill in profile fields on first sign-in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub name: Option<String>,
    #[serde(alias = "photoURL", alias = "photo")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// True when this call registered the account.
    pub created: bool,
    pub user: User,
}

impl From<UpsertOutcome> for SignInResponse {
    fn from(outcome: UpsertOutcome) -> Self {
        Self {
            created: outcome.created,
            user: outcome.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_accepts_legacy_photo_field() {
        let req: SignInRequest =
            serde_json::from_str(r#"{"name":"Alice","photoURL":"https://img/a.png"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Alice"));
        assert_eq!(req.photo_url.as_deref(), Some("https://img/a.png"));
    }

    #[test]
    fn sign_in_body_may_be_empty() {
        let req: SignInRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none() && req.photo_url.is_none());
    }
}
