//! HTTP middleware for Joblane Core
//!
//! Provides the JWT authentication extractor used by protected routes.

pub mod auth;

pub use auth::{AuthError, AuthUser};
