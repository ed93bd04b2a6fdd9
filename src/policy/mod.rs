//! Centralized authorization policy for HTTP handlers.
//!
//! Every mutating route funnels through [`enforce`] or [`require_role`] so the
//! ownership rule lives in exactly one place. The owner of an application for
//! status-update purposes is the parent job's poster, not the applicant; the
//! handlers resolve that indirection before calling in here.

use crate::domain::{StringUuid, UserRole};
use crate::error::AppError;

pub type PolicyResult<T> = std::result::Result<T, AppError>;

/// Authenticated actor as the policy sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: StringUuid,
    pub role: UserRole,
}

/// Ownership-gated actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    UpdateJob,
    DeleteJob,
    ViewJobApplications,
    UpdateApplicationStatus,
}

impl PolicyAction {
    fn denial_message(&self) -> &'static str {
        match self {
            PolicyAction::UpdateJob => "Not authorized to update this job",
            PolicyAction::DeleteJob => "Not authorized to delete this job",
            PolicyAction::ViewJobApplications => "Not authorized to view these applications",
            PolicyAction::UpdateApplicationStatus => "Not authorized to update this application",
        }
    }
}

/// Core ownership predicate: admins may mutate anything, everyone else only
/// what they own.
pub fn can_mutate(principal: &Principal, resource_owner: StringUuid) -> bool {
    principal.role == UserRole::Admin || principal.id == resource_owner
}

/// Role-gate predicate for route classes
pub fn has_role(principal: &Principal, allowed: &[UserRole]) -> bool {
    allowed.contains(&principal.role)
}

/// Enforce the ownership rule for an action, mapping denial to the
/// action-specific 403 message.
pub fn enforce(
    principal: &Principal,
    action: PolicyAction,
    resource_owner: StringUuid,
) -> PolicyResult<()> {
    if can_mutate(principal, resource_owner) {
        Ok(())
    } else {
        Err(AppError::Forbidden(action.denial_message().to_string()))
    }
}

/// Enforce a role gate, mapping denial to the shared 403 message.
pub fn require_role(principal: &Principal, allowed: &[UserRole]) -> PolicyResult<()> {
    if has_role(principal, allowed) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role ({}) not authorized",
            principal.role
        )))
    }
}

/// Admin user deletion carries one extra rule: an admin may not delete their
/// own account.
pub fn enforce_admin_delete_user(
    principal: &Principal,
    target_user_id: StringUuid,
) -> PolicyResult<()> {
    if principal.id == target_user_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own admin account".to_string(),
        ));
    }
    Ok(())
}
