//! Domain layer: entities, value objects and the rules that keep
//! derived counters in step with the facts they summarize.

pub mod comment;
pub mod favorite;
pub mod foundation;
pub mod lesson;
pub mod report;
pub mod user;
