//! Admin API HTTP handler tests
//!
//! Every endpoint under /api/admin requires the admin role.

use super::{build_test_router, delete_json_auth, get_json, get_json_auth, TestAppState};
use axum::http::StatusCode;
use joblane_core::domain::{StringUuid, UserRole};
use serde_json::Value;

// ============================================================================
// List Users Tests
// ============================================================================

#[tokio::test]
async fn test_list_users_as_admin() {
    let state = TestAppState::new();
    let (_, admin_token) = state.seed_user(UserRole::Admin).await;
    state.seed_user(UserRole::User).await;
    state.seed_user(UserRole::Employer).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json_auth(&app, "/api/admin/users", &admin_token).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.unwrap();
    let users = users.as_array().unwrap().clone();
    assert_eq!(users.len(), 3);
    for user in &users {
        assert!(user.get("_id").is_some());
        assert!(user.get("email").is_some());
        assert!(user.get("role").is_some());
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
    }
}

#[tokio::test]
async fn test_list_users_as_employer_forbidden() {
    let state = TestAppState::new();
    let (_, token) = state.seed_user(UserRole::Employer).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json_auth(&app, "/api/admin/users", &token).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap()["message"], "Role (employer) not authorized");
}

#[tokio::test]
async fn test_list_users_as_user_forbidden() {
    let state = TestAppState::new();
    let (_, token) = state.seed_user(UserRole::User).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json_auth(&app, "/api/admin/users", &token).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap()["message"], "Role (user) not authorized");
}

#[tokio::test]
async fn test_list_users_requires_token() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = get_json(&app, "/api/admin/users").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Delete User Tests
// ============================================================================

#[tokio::test]
async fn test_delete_user_as_admin() {
    let state = TestAppState::new();
    let (_, admin_token) = state.seed_user(UserRole::Admin).await;
    let (victim, victim_token) = state.seed_user(UserRole::User).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = delete_json_auth(
        &app,
        &format!("/api/admin/users/{}", victim.id),
        &admin_token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "User removed");

    // The deleted account can no longer authenticate
    let (status, _): (StatusCode, Option<Value>) =
        get_json_auth(&app, "/api/auth/me", &victim_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let state = TestAppState::new();
    let (admin, admin_token) = state.seed_user(UserRole::Admin).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        delete_json_auth(&app, &format!("/api/admin/users/{}", admin.id), &admin_token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap()["message"],
        "You cannot delete your own admin account"
    );

    // The account is still there
    let (status, body): (StatusCode, Option<Value>) =
        get_json_auth(&app, "/api/auth/me", &admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["_id"], admin.id.to_string());
}

#[tokio::test]
async fn test_delete_unknown_user_returns_404() {
    let state = TestAppState::new();
    let (_, admin_token) = state.seed_user(UserRole::Admin).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = delete_json_auth(
        &app,
        &format!("/api/admin/users/{}", StringUuid::new_v4()),
        &admin_token,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "User not found");
}

#[tokio::test]
async fn test_delete_user_as_employer_forbidden() {
    let state = TestAppState::new();
    let (_, token) = state.seed_user(UserRole::Employer).await;
    let (victim, _) = state.seed_user(UserRole::User).await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json_auth(&app, &format!("/api/admin/users/{}", victim.id), &token).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ============================================================================
// List Jobs Tests
// ============================================================================

#[tokio::test]
async fn test_list_jobs_as_admin() {
    let state = TestAppState::new();
    let (_, admin_token) = state.seed_user(UserRole::Admin).await;
    let (employer, _) = state.seed_user(UserRole::Employer).await;
    state.seed_job(employer.id).await;
    state.seed_job(employer.id).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json_auth(&app, "/api/admin/jobs", &admin_token).await;

    assert_eq!(status, StatusCode::OK);
    let jobs = body.unwrap();
    let jobs = jobs.as_array().unwrap().clone();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["postedBy"]["_id"], employer.id.to_string());
    assert_eq!(jobs[0]["postedBy"]["name"], employer.name);
}

#[tokio::test]
async fn test_list_jobs_as_user_forbidden() {
    let state = TestAppState::new();
    let (_, token) = state.seed_user(UserRole::User).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json_auth(&app, "/api/admin/jobs", &token).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap()["message"], "Role (user) not authorized");
}

// ============================================================================
// Delete Job Tests
// ============================================================================

#[tokio::test]
async fn test_delete_job_as_admin() {
    let state = TestAppState::new();
    let (_, admin_token) = state.seed_user(UserRole::Admin).await;
    let (employer, _) = state.seed_user(UserRole::Employer).await;
    let job = state.seed_job(employer.id).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        delete_json_auth(&app, &format!("/api/admin/jobs/{}", job.id), &admin_token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "Job removed by admin");

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, &format!("/api/jobs/{}", job.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_job_returns_404() {
    let state = TestAppState::new();
    let (_, admin_token) = state.seed_user(UserRole::Admin).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = delete_json_auth(
        &app,
        &format!("/api/admin/jobs/{}", StringUuid::new_v4()),
        &admin_token,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Job not found");
}
