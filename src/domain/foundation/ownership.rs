//! Ownership trait for user-owned resources.
//!
//! Lessons are owned by their creator and comments by their author.
//! Handlers call `check_ownership` with the verified principal's email.

use super::{DomainError, Email};

/// Trait for entities that have a single owning user.
pub trait OwnedByUser {
    /// Returns the email of the user who owns this resource.
    fn owner_email(&self) -> &Email;

    fn is_owner(&self, email: &Email) -> bool {
        self.owner_email() == email
    }

    /// Validates ownership, returning a `Forbidden` error if the
    /// requester is not the owner.
    fn check_ownership(&self, email: &Email) -> Result<(), DomainError> {
        if self.is_owner(email) {
            Ok(())
        } else {
            Err(DomainError::forbidden("User does not own this resource")
                .with_detail("owner", self.owner_email().to_string())
                .with_detail("requested_by", email.to_string()))
        }
    }
}
