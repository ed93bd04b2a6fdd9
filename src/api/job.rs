//! Job posting API handlers

use crate::api::{JobListQuery, JobListResponse, MessageResponse};
use crate::domain::{CreateJobInput, JobFilter, JobResponse, StringUuid, UpdateJobInput, UserRole};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::policy::{self, PolicyAction};
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Roles allowed to manage job postings
const POSTER_ROLES: &[UserRole] = &[UserRole::Employer, UserRole::Admin];

/// List jobs with filters and pagination (public)
pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let filter = JobFilter {
        location: query.location,
        job_type: query.job_type,
        company: query.company,
    };

    let (jobs, total) = state
        .job_service()
        .list(&filter, query.page, query.limit)
        .await?;

    let jobs = jobs.into_iter().map(JobResponse::from).collect();
    Ok(Json(JobListResponse::new(
        jobs,
        query.page,
        query.limit,
        total,
    )))
}

/// Job detail with poster contact info (public)
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service().get_with_poster(id).await?;
    Ok(Json(JobResponse::from(job)))
}

/// Create a job posting
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateJobInput>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), POSTER_ROLES)?;

    let job = state.job_service().create(auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Update a job posting (owner or admin)
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(input): Json<UpdateJobInput>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), POSTER_ROLES)?;

    let existing = state.job_service().get(id).await?;
    policy::enforce(
        &auth.principal(),
        PolicyAction::UpdateJob,
        existing.posted_by,
    )?;

    let job = state.job_service().update(id, input).await?;
    Ok(Json(job))
}

/// Delete a job posting (owner or admin)
pub async fn remove<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), POSTER_ROLES)?;

    let existing = state.job_service().get(id).await?;
    policy::enforce(
        &auth.principal(),
        PolicyAction::DeleteJob,
        existing.posted_by,
    )?;

    state.job_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Job removed")))
}
