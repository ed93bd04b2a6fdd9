//! Authentication API handlers

use crate::domain::{LoginInput, RegisterInput, UserProfile};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Register a new account and issue an access token
pub async fn register<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    let response = state.auth_service().register(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for an access token
pub async fn login<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let response = state.auth_service().login(input).await?;
    Ok(Json(response))
}

/// Profile of the authenticated user, without the password hash
pub async fn me<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let user = state.auth_service().current_user(auth.user_id).await?;
    Ok(Json(UserProfile::from(user)))
}
