//! The embedded like set of a lesson.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Email;

/// Emails of users who liked a lesson, in the order the likes arrived.
///
/// Membership is unique; `len()` is the authoritative like count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeSet(Vec<Email>);

/// Outcome of a like toggle as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    /// True if the user likes the lesson after the toggle.
    pub liked: bool,
    pub likes_count: u64,
}

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored emails, dropping duplicates.
    pub fn from_emails(emails: impl IntoIterator<Item = Email>) -> Self {
        let mut set = Self::new();
        for email in emails {
            if !set.contains(&email) {
                set.0.push(email);
            }
        }
        set
    }

    pub fn contains(&self, email: &Email) -> bool {
        self.0.iter().any(|e| e == email)
    }

    /// Removes the email if present, adds it otherwise.
    ///
    /// Returns true if the email is in the set afterwards.
    pub fn toggle(&mut self, email: &Email) -> bool {
        if let Some(pos) = self.0.iter().position(|e| e == email) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(email.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Email> {
        self.0.iter()
    }
}
