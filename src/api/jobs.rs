//! Job posting API endpoints
//!
//! Handles HTTP requests for job postings, all behind the access gate:
//! - GET /api/jobs - List postings visible to the caller
//! - POST /api/jobs - Create a posting
//! - GET /api/jobs/search?q= - Keyword search
//! - GET /api/jobs/{id} - Fetch one posting
//! - PUT /api/jobs/{id} - Overwrite a posting
//! - DELETE /api/jobs/{id} - Delete a posting

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{JobFields, JobPosting};
use crate::services::job::JobServiceError;

/// Response for mutations that don't return the posting
#[derive(Debug, Serialize)]
pub struct JobMessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", rename = "jobId")]
    pub job_id: Option<i64>,
}

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Build the jobs router (auth middleware is attached by the caller)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/search", get(search_jobs))
        .route("/{id}", get(get_job).put(update_job).delete(delete_job))
}

fn map_job_error(e: JobServiceError) -> ApiError {
    match e {
        JobServiceError::Forbidden => {
            ApiError::forbidden("Your role does not permit this operation")
        }
        JobServiceError::NotFound => ApiError::not_found("Job posting not found"),
        JobServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        JobServiceError::InternalError(e) => {
            tracing::error!("Job operation failed: {:#}", e);
            ApiError::internal_error("Internal server error")
        }
    }
}

/// GET /api/jobs - List postings, scoped by role
async fn list_jobs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<JobPosting>>, ApiError> {
    let postings = state
        .job_service
        .list(user.user_id, user.role)
        .await
        .map_err(map_job_error)?;

    Ok(Json(postings))
}

/// POST /api/jobs - Create a posting owned by the caller
async fn create_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(fields): Json<JobFields>,
) -> Result<Json<JobMessageResponse>, ApiError> {
    let posting = state
        .job_service
        .create(user.user_id, user.role, fields)
        .await
        .map_err(map_job_error)?;

    Ok(Json(JobMessageResponse {
        message: "Job posting created".to_string(),
        job_id: Some(posting.id),
    }))
}

/// GET /api/jobs/search?q= - Keyword search over title, description, location
async fn search_jobs(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobPosting>>, ApiError> {
    let postings = state
        .job_service
        .search(&params.q)
        .await
        .map_err(map_job_error)?;

    Ok(Json(postings))
}

/// GET /api/jobs/{id} - Fetch one posting
async fn get_job(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<JobPosting>, ApiError> {
    let posting = state.job_service.get(id).await.map_err(map_job_error)?;

    Ok(Json(posting))
}

/// PUT /api/jobs/{id} - Overwrite a posting's fields
async fn update_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(fields): Json<JobFields>,
) -> Result<Json<JobMessageResponse>, ApiError> {
    state
        .job_service
        .update(user.user_id, user.role, id, fields)
        .await
        .map_err(map_job_error)?;

    Ok(Json(JobMessageResponse {
        message: "Job posting updated".to_string(),
        job_id: None,
    }))
}

/// DELETE /api/jobs/{id} - Delete a posting
async fn delete_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<JobMessageResponse>, ApiError> {
    state
        .job_service
        .delete(user.user_id, user.role, id)
        .await
        .map_err(map_job_error)?;

    Ok(Json(JobMessageResponse {
        message: "Job posting deleted".to_string(),
        job_id: None,
    }))
}
