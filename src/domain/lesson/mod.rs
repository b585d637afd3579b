//! Lesson domain module.
//!
//! - `aggregate` - Lesson entity, creation draft and whitelisted patch
//! - `likes` - embedded like set
//! - `visibility` - privacy and access level

mod aggregate;
mod likes;
mod visibility;

pub use aggregate::{lesson_not_found, Lesson, LessonDraft, LessonPatch};
pub use likes::{LikeSet, LikeToggle};
pub use visibility::{AccessLevel, Privacy};
