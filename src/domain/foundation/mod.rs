//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, counters, and error types
//! that form the vocabulary of the lesson domain.

mod auth;
mod counter;
mod email;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use counter::{apply_delta, DerivedCounter};
pub use email::Email;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CommentId, FavoriteId, LessonId, ReportId, UserRecordId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
