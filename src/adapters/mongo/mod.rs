//! MongoDB adapter - the production document store.
//!
//! One repository per collection. Counter adjustments and the like
//! toggle are single-document update pipelines; uniqueness of favorites,
//! reports and user emails is enforced by unique indexes.

mod client;
mod comment_repository;
mod documents;
mod favorite_repository;
mod lesson_repository;
mod pipelines;
mod report_repository;
mod user_repository;

pub use client::{IntoIndexes, MongoClient, StoreTimeouts};
pub use comment_repository::MongoCommentRepository;
pub use documents::{CommentDoc, FavoriteDoc, LessonDoc, ReportDoc, UserDoc};
pub use favorite_repository::MongoFavoriteRepository;
pub use lesson_repository::MongoLessonRepository;
pub use report_repository::MongoReportRepository;
pub use user_repository::MongoUserRepository;
