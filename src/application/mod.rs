//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers own the ordering of multi-collection writes; query
//! handlers are plain reads.

pub mod access;
pub mod consistency;
pub mod handlers;
