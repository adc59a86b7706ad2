//! Job posting API endpoints.

use axum::extract::{Path, State};

use super::{done, success, success_with_message, ApiJson, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateJobPostingRequest, JobPosting, UpdateJobPostingRequest};
use crate::AppState;

/// GET /api/admin/careers/jobs - List all job postings.
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Vec<JobPosting>> {
    success(state.repo.list_job_postings(false).await?)
}

/// GET /api/careers/jobs - List the postings shown on the public careers page.
pub async fn list_active_jobs(State(state): State<AppState>) -> ApiResult<Vec<JobPosting>> {
    success(state.repo.list_job_postings(true).await?)
}

/// GET /api/admin/careers/jobs/:id - Get a single job posting.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<JobPosting> {
    match state.repo.get_job_posting(&id).await? {
        Some(job) => success(job),
        None => Err(AppError::NotFound(format!("Job posting {} not found", id))),
    }
}

/// POST /api/admin/careers/jobs - Create a job posting at the end of the list.
pub async fn create_job(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateJobPostingRequest>,
) -> ApiResult<JobPosting> {
    let posting = request.validate()?;
    let job = state.repo.create_job_posting(&posting).await?;

    tracing::info!(job_id = %job.id, order = job.order, "Created job posting");
    success_with_message(job, "Job posting created successfully")
}

/// PUT /api/admin/careers/jobs/:id - Update a job posting.
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateJobPostingRequest>,
) -> ApiResult<JobPosting> {
    let changes = request.validate()?;
    let job = state.repo.update_job_posting(&id, changes).await?;

    tracing::info!(job_id = %job.id, "Updated job posting");
    success_with_message(job, "Job posting updated successfully")
}

/// DELETE /api/admin/careers/jobs/:id - Delete a job posting.
pub async fn delete_job(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_job_posting(&id).await?;

    tracing::info!(job_id = %id, "Deleted job posting");
    done("Job posting deleted successfully")
}
