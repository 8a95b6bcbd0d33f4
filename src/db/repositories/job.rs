//! Job posting repository
//!
//! Database operations for job postings.
//!
//! This module provides:
//! - `JobRepository` trait defining the interface for posting data access
//! - `SqlxJobRepository` implementing the trait for SQLite
//!
//! Update and delete report whether a row was actually touched so the
//! service layer can surface a not-found error instead of silently
//! succeeding on a missing id.

use crate::models::{JobFields, JobPosting};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Job posting repository trait
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Create a new posting owned by `user_id`
    async fn create(&self, fields: &JobFields, user_id: i64) -> Result<JobPosting>;

    /// Overwrite the mutable fields of a posting.
    ///
    /// Returns `false` if no posting with the given id exists. The owner
    /// is never reassigned.
    async fn update(&self, id: i64, fields: &JobFields) -> Result<bool>;

    /// Delete a posting. Returns `false` if no posting with the given id exists.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Get a posting by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<JobPosting>>;

    /// List all postings
    async fn list_all(&self) -> Result<Vec<JobPosting>>;

    /// List postings owned by a given user
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<JobPosting>>;

    /// Case-insensitive substring search over title, description and location
    async fn search(&self, query: &str) -> Result<Vec<JobPosting>>;
}

/// SQLx-based job repository implementation
pub struct SqlxJobRepository {
    pool: SqlitePool,
}

impl SqlxJobRepository {
    /// Create a new SQLx job repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn shared(pool: SqlitePool) -> Arc<dyn JobRepository> {
        Arc::new(Self::new(pool))
    }
}

const JOB_COLUMNS: &str = "id, title, description, salary_range, location, company_name, application_link, user_id, created_at, updated_at";

#[async_trait]
impl JobRepository for SqlxJobRepository {
    async fn create(&self, fields: &JobFields, user_id: i64) -> Result<JobPosting> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO jobs (title, description, salary_range, location, company_name, application_link, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.salary_range)
        .bind(&fields.location)
        .bind(&fields.company_name)
        .bind(&fields.application_link)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create job posting")?;

        let id = result.last_insert_rowid();

        Ok(JobPosting {
            id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            salary_range: fields.salary_range.clone(),
            location: fields.location.clone(),
            company_name: fields.company_name.clone(),
            application_link: fields.application_link.clone(),
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: i64, fields: &JobFields) -> Result<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET title = ?, description = ?, salary_range = ?, location = ?,
                company_name = ?, application_link = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.salary_range)
        .bind(&fields.location)
        .bind(&fields.company_name)
        .bind(&fields.application_link)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update job posting")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete job posting")?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<JobPosting>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get job posting by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_job(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<JobPosting>> {
        let sql = format!("SELECT {} FROM jobs ORDER BY id", JOB_COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list job postings")?;

        rows.iter().map(row_to_job).collect()
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<JobPosting>> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE user_id = ? ORDER BY id",
            JOB_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list job postings by owner")?;

        rows.iter().map(row_to_job).collect()
    }

    async fn search(&self, query: &str) -> Result<Vec<JobPosting>> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            r#"
            SELECT {}
            FROM jobs
            WHERE title LIKE ? OR description LIKE ? OR location LIKE ?
            ORDER BY id
            "#,
            JOB_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await
            .context("Failed to search job postings")?;

        rows.iter().map(row_to_job).collect()
    }
}

fn row_to_job(row: &sqlx::sqlite::SqliteRow) -> Result<JobPosting> {
    Ok(JobPosting {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        salary_range: row.get("salary_range"),
        location: row.get("location"),
        company_name: row.get("company_name"),
        application_link: row.get("application_link"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
