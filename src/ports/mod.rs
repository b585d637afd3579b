//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage
//!
//! - `LessonRepository`, `UserRepository`, `FavoriteRepository`,
//!   `ReportRepository`, `CommentRepository`
//!
//! ## External services
//!
//! - `IdentityVerifier` - bearer token to verified principal
//! - `CheckoutProvider` - hosted checkout sessions and webhooks

mod checkout_provider;
mod comment_repository;
mod favorite_repository;
mod identity_verifier;
mod lesson_repository;
mod report_repository;
mod unique_insert;
mod user_repository;

pub use checkout_provider::{
    CheckoutProvider, CheckoutRequest, CheckoutSession, PaymentError, PaymentErrorCode,
    PaymentEvent, PaymentEventKind,
};
pub use comment_repository::CommentRepository;
pub use favorite_repository::FavoriteRepository;
pub use identity_verifier::IdentityVerifier;
pub use lesson_repository::{LessonFilter, LessonRepository};
pub use report_repository::ReportRepository;
pub use unique_insert::InsertOutcome;
pub use user_repository::UserRepository;
