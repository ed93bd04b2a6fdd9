//! Admin moderation API handlers

use crate::api::MessageResponse;
use crate::domain::{JobResponse, StringUuid, UserProfile, UserRole};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::policy;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List every registered user, without password hashes
pub async fn list_users<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), &[UserRole::Admin])?;

    let users = state.admin_service().list_users().await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();

    Ok(Json(profiles))
}

/// Delete a user account
pub async fn delete_user<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), &[UserRole::Admin])?;

    let user = state.admin_service().get_user(id).await?;
    policy::enforce_admin_delete_user(&auth.principal(), user.id)?;

    state.admin_service().delete_user(id).await?;
    Ok(Json(MessageResponse::new("User removed")))
}

/// List every job posting regardless of owner
pub async fn list_jobs<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), &[UserRole::Admin])?;

    let jobs = state.admin_service().list_jobs().await?;
    let jobs: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();

    Ok(Json(jobs))
}

/// Delete any job posting
pub async fn delete_job<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    policy::require_role(&auth.principal(), &[UserRole::Admin])?;

    state.admin_service().delete_job(id).await?;
    Ok(Json(MessageResponse::new("Job removed by admin")))
}
