//! Data access layer (Repository pattern)

pub mod application;
pub mod job;
pub mod user;

pub use application::ApplicationRepository;
pub use job::JobRepository;
pub use user::UserRepository;
