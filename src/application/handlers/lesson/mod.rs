//! Lesson command and query handlers.

mod create_lesson;
mod delete_lesson;
mod lesson_queries;
mod toggle_like;
mod update_lesson;

pub use create_lesson::{CreateLessonCommand, CreateLessonHandler};
pub use delete_lesson::{DeleteLessonCommand, DeleteLessonHandler};
pub use lesson_queries::{GetLessonHandler, ListLessonsHandler};
pub use toggle_like::{ToggleLikeCommand, ToggleLikeHandler};
pub use update_lesson::{UpdateLessonCommand, UpdateLessonHandler};
