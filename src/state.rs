//! Application state traits for dependency injection
//!
//! This module defines traits that abstract the application state,
//! enabling the same handler code to work with both production
//! and test implementations.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{ApplicationRepository, JobRepository, UserRepository};
use crate::service::{AdminService, ApplicationService, AuthService, JobService};

/// Trait for application state that provides access to all services.
///
/// This trait enables dependency injection by allowing handlers to work
/// with any type that provides the required services, whether that's
/// the production `AppState` or a test implementation.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The user repository type
    type UserRepo: UserRepository;
    /// The job repository type
    type JobRepo: JobRepository;
    /// The application repository type
    type ApplicationRepo: ApplicationRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the authentication service
    fn auth_service(&self) -> &AuthService<Self::UserRepo>;

    /// Get the job service
    fn job_service(&self) -> &JobService<Self::JobRepo>;

    /// Get the application service
    fn application_service(&self) -> &ApplicationService<Self::ApplicationRepo, Self::JobRepo>;

    /// Get the admin service
    fn admin_service(&self) -> &AdminService<Self::UserRepo, Self::JobRepo>;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    /// Check if the system is ready (database is healthy)
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
