//! Lesson Hub - backend API for sharing life lessons
//!
//! Users publish lessons, like and save other people's lessons, comment on
//! them and report abuse. Several counters are derived from those facts
//! (lessons created and saved per user, favorites and likes per lesson);
//! the application handlers keep them in step with the membership records
//! without multi-document transactions.
//!
//! Layout follows ports and adapters:
//!
//! - `domain` - entities, value objects and counter arithmetic
//! - `ports` - storage, identity and checkout traits
//! - `application` - one handler per operation, owning multi-step writes
//! - `adapters` - MongoDB, in-memory, Firebase, Stripe and HTTP
//! - `config` - layered configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
