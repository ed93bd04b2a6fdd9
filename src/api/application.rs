//! Job application API handlers

use crate::domain::{
    ApplicationWithApplicant, ApplicationWithJob, ApplyInput, StringUuid, UpdateStatusInput,
    UserRole,
};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::policy::{self, PolicyAction};
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Roles allowed to review applications for their own jobs
const REVIEWER_ROLES: &[UserRole] = &[UserRole::Employer, UserRole::Admin];

/// Apply to a job (applicant accounts only)
///
/// A resume is required; a missing or empty body comes back as a 400 from
/// the service rather than a deserialization error.
pub async fn apply<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(job_id): Path<StringUuid>,
    body: Option<Json<ApplyInput>>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), &[UserRole::User])?;

    let input = body.map(|Json(input)| input).unwrap_or_default();
    let application = state
        .application_service()
        .apply(auth.user_id, job_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// Applications submitted by the authenticated applicant
pub async fn my_applications<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), &[UserRole::User])?;

    let applications: Vec<ApplicationWithJob> = state
        .application_service()
        .my_applications(auth.user_id)
        .await?
        .into_iter()
        .map(ApplicationWithJob::from)
        .collect();

    Ok(Json(applications))
}

/// Applications received for a job (job owner or admin)
pub async fn for_job<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(job_id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), REVIEWER_ROLES)?;

    let job = state.job_service().get(job_id).await?;
    policy::enforce(
        &auth.principal(),
        PolicyAction::ViewJobApplications,
        job.posted_by,
    )?;

    let applications: Vec<ApplicationWithApplicant> = state
        .application_service()
        .applications_for_job(job_id)
        .await?
        .into_iter()
        .map(ApplicationWithApplicant::from)
        .collect();

    Ok(Json(applications))
}

/// Update an application's status (owner of the parent job or admin)
pub async fn update_status<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    body: Option<Json<UpdateStatusInput>>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), REVIEWER_ROLES)?;

    let application = state.application_service().get(id).await?;
    let job = state.job_service().get(application.job_id).await?;
    policy::enforce(
        &auth.principal(),
        PolicyAction::UpdateApplicationStatus,
        job.posted_by,
    )?;

    let input = body.map(|Json(input)| input).unwrap_or_default();
    let updated = state
        .application_service()
        .update_status(id, input)
        .await?;

    Ok(Json(updated))
}
