//! Derived counters and their floor-at-zero arithmetic.
//!
//! Counters are maintained incrementally alongside the membership facts
//! they summarize. Stores must apply `apply_delta` atomically at the
//! field level; the function here is the single definition of the
//! arithmetic both adapters follow.

use std::fmt;

/// The four derived counters the consistency engine maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedCounter {
    /// `User.totalLessonsCreated`
    LessonsCreated,
    /// `User.totalLessonsSaved`
    LessonsSaved,
    /// `Lesson.favoritesCount`
    FavoritesCount,
    /// `Lesson.likesCount`
    LikesCount,
}

impl DerivedCounter {
    /// Stored field name of the counter.
    pub fn field(&self) -> &'static str {
        match self {
            DerivedCounter::LessonsCreated => "totalLessonsCreated",
            DerivedCounter::LessonsSaved => "totalLessonsSaved",
            DerivedCounter::FavoritesCount => "favoritesCount",
            DerivedCounter::LikesCount => "likesCount",
        }
    }
}

impl fmt::Display for DerivedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Adds a signed delta to a counter, clamping at zero.
pub fn apply_delta(current: u64, delta: i64) -> u64 {
    if delta >= 0 {
        current.saturating_add(delta.unsigned_abs())
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}
