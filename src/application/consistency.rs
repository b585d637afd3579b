//! Best-effort maintenance of derived counters.
//!
//! Multi-step writes first perform their authoritative step (insert or
//! delete the fact), then adjust each affected counter with an atomic,
//! floored storage operation. Counter steps are attempted independently so
//! one failure does not skip the next. Failures are logged under
//! [`RECONCILE_TARGET`] with the entity and delta, which is what a
//! recomputation job keys on, and surface to the caller as `PARTIAL_WRITE`.

use std::fmt::Display;
use std::future::Future;

use tracing::{error, warn};

use crate::domain::foundation::{DerivedCounter, DomainError, ErrorCode};

/// Log target for counter drift.
pub const RECONCILE_TARGET: &str = "lesson_hub::reconcile";

/// Collects the outcome of the counter steps of one operation.
#[derive(Debug)]
pub struct CounterAdjustments {
    operation: &'static str,
    failed: Vec<(DerivedCounter, String, DomainError)>,
}

impl CounterAdjustments {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            failed: Vec::new(),
        }
    }

    /// Awaits one counter adjustment.
    ///
    /// `Ok(false)` means the document holding the counter does not exist
    /// (for example a creator who never signed in); there is nothing to
    /// drift, so it is only logged.
    pub async fn apply<F>(
        &mut self,
        counter: DerivedCounter,
        entity: impl Display,
        delta: i64,
        step: F,
    ) where
        F: Future<Output = Result<bool, DomainError>>,
    {
        let entity = entity.to_string();
        match step.await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    target: RECONCILE_TARGET,
                    operation = self.operation,
                    counter = %counter,
                    entity = %entity,
                    delta,
                    "counter owner missing, adjustment skipped"
                );
            }
            Err(err) => {
                error!(
                    target: RECONCILE_TARGET,
                    operation = self.operation,
                    counter = %counter,
                    entity = %entity,
                    delta,
                    error = %err,
                    "derived counter drifted from membership facts"
                );
                self.failed.push((counter, entity, err));
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// `Ok(())` if every step succeeded, otherwise a `PARTIAL_WRITE` error
    /// naming the counters and entities left behind.
    pub fn finish(self) -> Result<(), DomainError> {
        if self.failed.is_empty() {
            return Ok(());
        }
        let mut err = DomainError::new(
            ErrorCode::PartialWrite,
            format!(
                "{} was applied but {} derived counter update(s) failed",
                self.operation,
                self.failed.len()
            ),
        )
        .with_detail("operation", self.operation);
        for (counter, entity, cause) in &self.failed {
            err = err.with_detail(counter.field(), format!("{} ({})", entity, cause.code));
        }
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn all_steps_succeeding_finishes_ok() {
        let mut steps = CounterAdjustments::new("add favorite");
        steps
            .apply(DerivedCounter::FavoritesCount, "lesson-1", 1, async { Ok(true) })
            .await;
        steps
            .apply(DerivedCounter::LessonsSaved, "b@y.com", 1, async { Ok(true) })
            .await;
        assert!(!steps.has_failures());
        assert!(steps.finish().is_ok());
    }

    #[tokio::test]
    async fn missing_owner_is_not_a_failure() {
        let mut steps = CounterAdjustments::new("create lesson");
        steps
            .apply(DerivedCounter::LessonsCreated, "ghost@x.com", 1, async { Ok(false) })
            .await;
        assert!(steps.finish().is_ok());
    }

    #[tokio::test]
    async fn failed_step_yields_partial_write_with_details() {
        let mut steps = CounterAdjustments::new("add favorite");
        steps
            .apply(DerivedCounter::FavoritesCount, "lesson-1", 1, async {
                Err(DomainError::new(ErrorCode::StorageTimeout, "timed out"))
            })
            .await;
        steps
            .apply(DerivedCounter::LessonsSaved, "b@y.com", 1, async { Ok(true) })
            .await;

        let err = steps.finish().unwrap_err();
        assert_eq!(err.code, ErrorCode::PartialWrite);
        assert_eq!(
            err.details.get("favoritesCount"),
            Some(&"lesson-1 (STORAGE_TIMEOUT)".to_string())
        );
        assert!(err.details.get("totalLessonsSaved").is_none());
        assert_eq!(err.details.get("operation"), Some(&"add favorite".to_string()));
    }
}
