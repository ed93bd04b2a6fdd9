//! JWT Authentication middleware and extractors
//!
//! Provides the `AuthUser` extractor for handlers requiring an
//! authenticated user. Access tokens carry only the user id, so the
//! extractor loads name, email and role from the database on every
//! request. Role changes and account deletions take effect on the
//! next request rather than at token expiry.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};

use crate::domain::{StringUuid, UserRole};
use crate::error::AppError;
use crate::policy::Principal;
use crate::state::HasServices;

/// Authenticated user information resolved from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token's `sub` claim
    pub user_id: StringUuid,
    /// User's display name
    pub name: String,
    /// User's email address
    pub email: String,
    /// Role loaded from the database, not from the token
    pub role: UserRole,
}

impl AuthUser {
    /// View of this user for authorization checks
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.user_id,
            role: self.role,
        }
    }
}

/// Authentication errors
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed
    InvalidToken(String),
    /// Token was valid but the user no longer exists
    UserNotFound,
    /// User lookup failed for an unrelated reason
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Missing authorization token",
            ),
            AuthError::InvalidHeader(_) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid authorization header",
            ),
            AuthError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid token"),
            AuthError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Not authorized, user not found",
            ),
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Authentication lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Authentication failed",
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": code
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Extract and validate Bearer token from Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AuthError::InvalidHeader(
            "Authorization header must use Bearer scheme".to_string(),
        ));
    }

    Ok(&auth_header[7..])
}

/// Axum extractor for authenticated users
///
/// Validates the JWT from the Authorization header, then resolves the
/// `sub` claim against the users table.
///
/// # Example
///
/// ```ignore
/// async fn protected_handler(
///     auth: AuthUser,
///     State(state): State<AppState>,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", auth.name)
/// }
/// ```
impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state
            .jwt_manager()
            .verify_access_token(token)
            .map_err(|_| AuthError::InvalidToken("Token validation failed".to_string()))?;

        let user_id = StringUuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::InvalidToken("Invalid user ID in token".to_string()))?;

        let user = state
            .auth_service()
            .current_user(user_id)
            .await
            .map_err(|err| match err {
                AppError::Unauthorized(_) => AuthError::UserNotFound,
                other => AuthError::Internal(other.to_string()),
            })?;

        Ok(AuthUser {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        })
    }
}
