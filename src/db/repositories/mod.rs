//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod job;
pub mod user;

pub use job::{JobRepository, SqlxJobRepository};
pub use user::{SqlxUserRepository, UserRepository};
