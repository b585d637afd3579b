//! Outcome of an insert guarded by a storage-level uniqueness constraint.

/// A uniqueness violation is an expected answer, not a failure: it is how
/// a store reports "this pair already exists" without a prior read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

impl InsertOutcome {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, InsertOutcome::Duplicate)
    }
}
