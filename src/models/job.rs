//! Job posting model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting owned by an employer account.
///
/// All descriptive fields except the title are optional free text. The owner
/// is set at creation time and never reassigned; deleting the owner cascades
/// to their postings at the database level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    /// Unique identifier
    pub id: i64,
    /// Job title (required)
    pub title: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub application_link: Option<String>,
    /// Owning user id
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields of a posting, used for both create and full-overwrite
/// update operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobFields {
    pub title: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub application_link: Option<String>,
}

impl JobFields {
    /// A posting must carry a non-blank title; everything else is free text.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Job title is required".to_string());
        }
        Ok(())
    }
}
