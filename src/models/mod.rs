//! Data models
//!
//! This module contains the data structures used throughout the portal:
//! - Database entities (User, JobPosting)
//! - Input structs for create/update operations

mod job;
mod user;

pub use job::{JobFields, JobPosting};
pub use user::{User, UserRole};
