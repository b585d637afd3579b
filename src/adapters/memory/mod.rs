//! In-memory repositories.
//!
//! Each store honours the same contract as the MongoDB adapter: unique
//! pairs are rejected as `InsertOutcome::Duplicate`, counter adjustments
//! floor at zero, and every mutation happens under one write lock so it is
//! atomic with respect to concurrent callers. Used by tests and for
//! running the API without a database.

mod comment_store;
mod favorite_store;
mod lesson_store;
mod report_store;
mod user_store;

pub use comment_store::InMemoryCommentRepository;
pub use favorite_store::InMemoryFavoriteRepository;
pub use lesson_store::InMemoryLessonRepository;
pub use report_store::InMemoryReportRepository;
pub use user_store::InMemoryUserRepository;

/// Newest first; for equal keys the later insertion wins.
fn newest_first<T: Clone, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}
