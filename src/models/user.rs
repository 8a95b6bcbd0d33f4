//! User model
//!
//! Defines the User entity and the role enumeration used for authorization
//! throughout the portal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User entity representing a registered account.
///
/// The role is fixed at signup and determines what the user can do with
/// job postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique, immutable after creation)
    pub username: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role
    pub role: UserRole,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the given parameters.
    ///
    /// Note: the password must already be hashed before calling this.
    /// Use `services::password::hash_password()`.
    pub fn new(username: String, password_hash: String, role: UserRole) -> Self {
        Self {
            id: 0, // set by the database
            username,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    /// Check if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// User role for authorization.
///
/// - Admin: full access to all postings
/// - Employer: creates and manages own postings
/// - JobSeeker: browses and searches postings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Browses and searches postings
    #[serde(rename = "JOB_SEEKER")]
    JobSeeker,
    /// Creates and manages own postings
    #[serde(rename = "EMPLOYER")]
    Employer,
    /// Full access
    #[serde(rename = "ADMIN")]
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::JobSeeker => write!(f, "JOB_SEEKER"),
            UserRole::Employer => write!(f, "EMPLOYER"),
            UserRole::Admin => write!(f, "ADMIN"),
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JOB_SEEKER" => Ok(UserRole::JobSeeker),
            "EMPLOYER" => Ok(UserRole::Employer),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}
