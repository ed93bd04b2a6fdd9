//! Business logic layer

pub mod admin;
pub mod application;
pub mod auth;
pub mod job;

pub use admin::AdminService;
pub use application::ApplicationService;
pub use auth::AuthService;
pub use job::JobService;
