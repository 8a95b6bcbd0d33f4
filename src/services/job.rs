//! Job posting service
//!
//! Business logic for job postings. Every mutating operation goes through
//! the role policy; handlers only pass along who is asking.

use crate::db::repositories::JobRepository;
use crate::models::{JobFields, JobPosting, UserRole};
use crate::services::policy::{self, ListScope};
use anyhow::Context;
use std::sync::Arc;

/// Error types for job service operations
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    /// Caller's role does not permit the operation
    #[error("Operation not permitted for this role")]
    Forbidden,

    /// No posting with the given id
    #[error("Job posting not found")]
    NotFound,

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Job posting service
pub struct JobService {
    job_repo: Arc<dyn JobRepository>,
}

impl JobService {
    /// Create a new job service
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    /// Create a posting owned by the caller.
    pub async fn create(
        &self,
        caller_id: i64,
        role: UserRole,
        fields: JobFields,
    ) -> Result<JobPosting, JobServiceError> {
        if !policy::can_create(role) {
            return Err(JobServiceError::Forbidden);
        }
        fields.validate().map_err(JobServiceError::ValidationError)?;

        let posting = self
            .job_repo
            .create(&fields, caller_id)
            .await
            .context("Failed to create job posting")?;

        tracing::info!(job_id = posting.id, user_id = caller_id, "Job posting created");

        Ok(posting)
    }

    /// Overwrite the fields of a posting.
    ///
    /// Ownership never changes on update. The not-found check runs before
    /// the permission check so admins get an honest 404 for missing ids,
    /// while non-owners of an existing posting get a forbidden error.
    pub async fn update(
        &self,
        caller_id: i64,
        role: UserRole,
        id: i64,
        fields: JobFields,
    ) -> Result<JobPosting, JobServiceError> {
        fields.validate().map_err(JobServiceError::ValidationError)?;

        let existing = self
            .job_repo
            .get_by_id(id)
            .await
            .context("Failed to load job posting")?
            .ok_or(JobServiceError::NotFound)?;

        if !policy::can_modify(role, caller_id, existing.user_id) {
            return Err(JobServiceError::Forbidden);
        }

        let touched = self
            .job_repo
            .update(id, &fields)
            .await
            .context("Failed to update job posting")?;
        if !touched {
            return Err(JobServiceError::NotFound);
        }

        let updated = self
            .job_repo
            .get_by_id(id)
            .await
            .context("Failed to reload job posting")?
            .ok_or(JobServiceError::NotFound)?;

        tracing::info!(job_id = id, user_id = caller_id, "Job posting updated");

        Ok(updated)
    }

    /// Delete a posting.
    pub async fn delete(
        &self,
        caller_id: i64,
        role: UserRole,
        id: i64,
    ) -> Result<(), JobServiceError> {
        let existing = self
            .job_repo
            .get_by_id(id)
            .await
            .context("Failed to load job posting")?
            .ok_or(JobServiceError::NotFound)?;

        if !policy::can_modify(role, caller_id, existing.user_id) {
            return Err(JobServiceError::Forbidden);
        }

        let deleted = self
            .job_repo
            .delete(id)
            .await
            .context("Failed to delete job posting")?;
        if !deleted {
            return Err(JobServiceError::NotFound);
        }

        tracing::info!(job_id = id, user_id = caller_id, "Job posting deleted");

        Ok(())
    }

    /// Get a single posting by id.
    pub async fn get(&self, id: i64) -> Result<JobPosting, JobServiceError> {
        self.job_repo
            .get_by_id(id)
            .await
            .context("Failed to load job posting")?
            .ok_or(JobServiceError::NotFound)
    }

    /// List postings visible to the caller.
    ///
    /// Employers see only their own postings; job seekers and admins see
    /// everything.
    pub async fn list(
        &self,
        caller_id: i64,
        role: UserRole,
    ) -> Result<Vec<JobPosting>, JobServiceError> {
        let postings = match policy::list_scope(role) {
            ListScope::All => self.job_repo.list_all().await,
            ListScope::Owned => self.job_repo.list_by_owner(caller_id).await,
        }
        .context("Failed to list job postings")?;

        Ok(postings)
    }

    /// Keyword search over title, description and location.
    pub async fn search(&self, query: &str) -> Result<Vec<JobPosting>, JobServiceError> {
        let postings = self
            .job_repo
            .search(query)
            .await
            .context("Failed to search job postings")?;

        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxJobRepository, SqlxUserRepository, UserRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;

    struct Fixture {
        service: JobService,
        employer_id: i64,
        other_employer_id: i64,
        admin_id: i64,
        seeker_id: i64,
    }

    async fn setup() -> Fixture {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::new(pool.clone());
        let mut ids = Vec::new();
        for (name, role) in [
            ("employer", UserRole::Employer),
            ("rival", UserRole::Employer),
            ("admin", UserRole::Admin),
            ("seeker", UserRole::JobSeeker),
        ] {
            let user = users
                .create(&User::new(name.to_string(), "hash".to_string(), role))
                .await
                .expect("Failed to create user");
            ids.push(user.id);
        }

        Fixture {
            service: JobService::new(SqlxJobRepository::shared(pool)),
            employer_id: ids[0],
            other_employer_id: ids[1],
            admin_id: ids[2],
            seeker_id: ids[3],
        }
    }

    fn fields(title: &str) -> JobFields {
        JobFields {
            title: title.to_string(),
            location: Some("Berlin".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_employer_creates_posting() {
        let fx = setup().await;

        let posting = fx
            .service
            .create(fx.employer_id, UserRole::Employer, fields("Backend Engineer"))
            .await
            .expect("Create should succeed");

        assert_eq!(posting.user_id, fx.employer_id);
        assert_eq!(posting.title, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_job_seeker_cannot_create() {
        let fx = setup().await;

        let result = fx
            .service
            .create(fx.seeker_id, UserRole::JobSeeker, fields("Sneaky"))
            .await;

        assert!(matches!(result, Err(JobServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let fx = setup().await;

        let result = fx
            .service
            .create(fx.employer_id, UserRole::Employer, fields("  "))
            .await;

        assert!(matches!(result, Err(JobServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_owner_updates_own_posting() {
        let fx = setup().await;
        let posting = fx
            .service
            .create(fx.employer_id, UserRole::Employer, fields("Old"))
            .await
            .expect("Create should succeed");

        let updated = fx
            .service
            .update(fx.employer_id, UserRole::Employer, posting.id, fields("New"))
            .await
            .expect("Update should succeed");

        assert_eq!(updated.title, "New");
        assert_eq!(updated.user_id, fx.employer_id);
    }

    #[tokio::test]
    async fn test_employer_cannot_update_others_posting() {
        let fx = setup().await;
        let posting = fx
            .service
            .create(fx.employer_id, UserRole::Employer, fields("Mine"))
            .await
            .expect("Create should succeed");

        let result = fx
            .service
            .update(
                fx.other_employer_id,
                UserRole::Employer,
                posting.id,
                fields("Stolen"),
            )
            .await;

        assert!(matches!(result, Err(JobServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn test_admin_updates_any_posting() {
        let fx = setup().await;
        let posting = fx
            .service
            .create(fx.employer_id, UserRole::Employer, fields("Original"))
            .await
            .expect("Create should succeed");

        let updated = fx
            .service
            .update(fx.admin_id, UserRole::Admin, posting.id, fields("Moderated"))
            .await
            .expect("Admin update should succeed");

        assert_eq!(updated.title, "Moderated");
        // Ownership stays with the employer even after an admin edit
        assert_eq!(updated.user_id, fx.employer_id);
    }

    #[tokio::test]
    async fn test_update_missing_posting_is_not_found() {
        let fx = setup().await;

        let result = fx
            .service
            .update(fx.admin_id, UserRole::Admin, 999, fields("Ghost"))
            .await;

        assert!(matches!(result, Err(JobServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let fx = setup().await;
        let posting = fx
            .service
            .create(fx.employer_id, UserRole::Employer, fields("Doomed"))
            .await
            .expect("Create should succeed");

        // Another employer cannot delete it
        let result = fx
            .service
            .delete(fx.other_employer_id, UserRole::Employer, posting.id)
            .await;
        assert!(matches!(result, Err(JobServiceError::Forbidden)));

        // A seeker cannot delete it
        let result = fx
            .service
            .delete(fx.seeker_id, UserRole::JobSeeker, posting.id)
            .await;
        assert!(matches!(result, Err(JobServiceError::Forbidden)));

        // The owner can
        fx.service
            .delete(fx.employer_id, UserRole::Employer, posting.id)
            .await
            .expect("Owner delete should succeed");

        // Deleting again reports not found
        let result = fx
            .service
            .delete(fx.employer_id, UserRole::Employer, posting.id)
            .await;
        assert!(matches!(result, Err(JobServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_missing_posting() {
        let fx = setup().await;

        let result = fx.service.get(12345).await;

        assert!(matches!(result, Err(JobServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_scoping() {
        let fx = setup().await;
        fx.service
            .create(fx.employer_id, UserRole::Employer, fields("Mine"))
            .await
            .expect("Create should succeed");
        fx.service
            .create(fx.other_employer_id, UserRole::Employer, fields("Theirs"))
            .await
            .expect("Create should succeed");

        // Employer only sees own postings
        let mine = fx
            .service
            .list(fx.employer_id, UserRole::Employer)
            .await
            .expect("List should succeed");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");

        // Admin and seeker see everything
        let all = fx
            .service
            .list(fx.admin_id, UserRole::Admin)
            .await
            .expect("List should succeed");
        assert_eq!(all.len(), 2);

        let all = fx
            .service
            .list(fx.seeker_id, UserRole::JobSeeker)
            .await
            .expect("List should succeed");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_search() {
        let fx = setup().await;
        fx.service
            .create(fx.employer_id, UserRole::Employer, fields("Rust Developer"))
            .await
            .expect("Create should succeed");
        fx.service
            .create(fx.employer_id, UserRole::Employer, fields("Gardener"))
            .await
            .expect("Create should succeed");

        let hits = fx.service.search("rust").await.expect("Search should succeed");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Rust Developer");

        let hits = fx
            .service
            .search("astronaut")
            .await
            .expect("Search should succeed");
        assert!(hits.is_empty());
    }
}
