//! REST API shared utilities (response types, pagination)

pub mod admin;
pub mod application;
pub mod auth;
pub mod health;
pub mod job;

use crate::domain::{JobResponse, JobType};
use serde::{Deserialize, Serialize};

/// Maximum allowed limit value for pagination
pub(crate) const MAX_LIMIT: i64 = 100;

/// Query parameters for the public job listing.
///
/// Pagination fields are inlined rather than flattened because
/// `serde_urlencoded` does not support `#[serde(flatten)]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub company: Option<String>,
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: i64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: i64,
}

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_limit() -> i64 {
    10
}

/// Reject page values less than 1
pub(crate) fn deserialize_page<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "page must be a positive integer (>= 1)",
        ));
    }
    Ok(value)
}

/// Reject limit values less than 1, clamp to MAX_LIMIT
pub(crate) fn deserialize_limit<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "limit must be a positive integer (>= 1)",
        ));
    }
    Ok(value.min(MAX_LIMIT))
}

/// Paginated job listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub jobs: Vec<JobResponse>,
}

impl JobListResponse {
    pub fn new(jobs: Vec<JobResponse>, page: i64, limit: i64, total: i64) -> Self {
        let pages = (total as f64 / limit as f64).ceil() as i64;
        Self {
            total,
            page,
            pages,
            jobs,
        }
    }
}

/// Message response (for delete, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
