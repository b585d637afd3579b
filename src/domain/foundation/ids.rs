//! Strongly-typed identifier value objects.
//!
//! Every stored entity is keyed by a random v4 UUID, persisted in its
//! hyphenated string form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parses a client-supplied identifier.
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                raw.trim()
                    .parse()
                    .map_err(|_| ValidationError::invalid_format($field, "not a valid identifier"))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a lesson.
    LessonId,
    "lessonId"
);

uuid_id!(
    /// Unique identifier for a user record. Users are addressed by email;
    /// this id only names the stored document.
    UserRecordId,
    "userId"
);

uuid_id!(
    /// Unique identifier for a favorite.
    FavoriteId,
    "favoriteId"
);

uuid_id!(
    /// Unique identifier for an abuse report.
    ReportId,
    "reportId"
);

uuid_id!(
    /// Unique identifier for a comment.
    CommentId,
    "commentId"
);
