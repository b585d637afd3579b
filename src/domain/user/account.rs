//! User account entity.
//!
//! # Invariants
//!
//! - `email` is unique across users
//! - `total_lessons_created` tracks the lessons whose creator is this email
//! - `total_lessons_saved` tracks the favorites held by this email
//! - both counters are never negative

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    apply_delta, DomainError, Email, ErrorCode, Timestamp, UserRecordId,
};

use super::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserRecordId,
    pub email: Email,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Role,
    pub is_premium: bool,
    pub total_lessons_created: u64,
    pub total_lessons_saved: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile data presented at sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub email: Email,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// Result of an upsert-on-login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub user: User,
    /// True if this call created the user.
    pub created: bool,
}

impl User {
    /// A first-time user: plain role, not premium, counters at zero.
    pub fn register(sign_in: SignIn, now: Timestamp) -> Self {
        Self {
            id: UserRecordId::new(),
            email: sign_in.email,
            name: sign_in.name,
            photo_url: sign_in.photo_url,
            role: Role::User,
            is_premium: false,
            total_lessons_created: 0,
            total_lessons_saved: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn adjust_lessons_created(&mut self, delta: i64) {
        self.total_lessons_created = apply_delta(self.total_lessons_created, delta);
    }

    pub fn adjust_lessons_saved(&mut self, delta: i64) {
        self.total_lessons_saved = apply_delta(self.total_lessons_saved, delta);
    }
}

/// Error for an email that does not resolve to a user.
pub fn user_not_found(email: &Email) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", email))
        .with_detail("email", email.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_in(email: &str) -> SignIn {
        SignIn {
            email: Email::new(email).unwrap(),
            name: Some("Alice".to_string()),
            photo_url: None,
        }
    }

    #[test]
    fn register_applies_defaults() {
        let now = Timestamp::now();
        let user = User::register(sign_in("a@x.com"), now);
        assert_eq!(user.role, Role::User);
        assert!(!user.is_premium);
        assert_eq!(user.total_lessons_created, 0);
        assert_eq!(user.total_lessons_saved, 0);
        assert_eq!(user.created_at, now);
        assert_eq!(user.updated_at, now);
    }

    #[test]
    fn counters_floor_at_zero() {
        let mut user = User::register(sign_in("a@x.com"), Timestamp::now());
        user.adjust_lessons_saved(-1);
        user.adjust_lessons_created(-3);
        assert_eq!(user.total_lessons_saved, 0);
        assert_eq!(user.total_lessons_created, 0);
    }

    #[test]
    fn user_serializes_with_camel_case_counters() {
        let user = User::register(sign_in("a@x.com"), Timestamp::now());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["totalLessonsCreated"], 0);
        assert_eq!(json["isPremium"], false);
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn user_not_found_carries_email() {
        let err = user_not_found(&Email::new("z@z.com").unwrap());
        assert_eq!(err.code, ErrorCode::UserNotFound);
        assert_eq!(err.details.get("email"), Some(&"z@z.com".to_string()));
    }
}
