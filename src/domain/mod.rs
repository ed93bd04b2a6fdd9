//! Domain models for Joblane Core

pub mod application;
pub mod common;
pub mod job;
pub mod user;

pub use application::*;
pub use common::*;
pub use job::*;
pub use user::*;
