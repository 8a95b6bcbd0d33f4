//! Database layer
//!
//! SQLite-backed persistence for the portal, chosen for single-binary
//! deployment. Access goes through trait-based repositories so services
//! never touch SQL directly.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
