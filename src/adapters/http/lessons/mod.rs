//! HTTP adapter for lessons: listing, CRUD and likes.

mod dto;
mod handlers;
mod routes;

pub use dto::{DeletedLessonResponse, LessonListQuery, ToggleLikeRequest};
pub use routes::lesson_routes;
