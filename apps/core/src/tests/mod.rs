//! Test Module
//!
//! End-to-end test suite for the SecAware engine.
//!
//! ## Test Categories
//! - `engine_tests`: full lookup pipeline, follow-ups, memory, inserts
//! - `database_tests`: knowledge store schema, seeding and CRUD
//!
//! Unit tests for the individual brain components live next to the
//! components themselves, in their `#[cfg(test)]` modules.

pub mod database_tests;
