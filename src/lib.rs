//! Joblane Core - Job Board Service Backend
//!
//! This crate provides the core functionality for the Joblane job board,
//! including the REST API, JWT authentication, and MySQL persistence.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod policy;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
