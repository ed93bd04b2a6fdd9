//! Job domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Employment type. JSON uses the canonical hyphenated labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    Contract,
    Internship,
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full-time" => Ok(JobType::FullTime),
            "part-time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            _ => Err(format!("Unknown job type: {}", s)),
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::FullTime => write!(f, "Full-Time"),
            JobType::PartTime => write!(f, "Part-Time"),
            JobType::Contract => write!(f, "Contract"),
            JobType::Internship => write!(f, "Internship"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for JobType {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for JobType {
    fn decode(value: sqlx::mysql::MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for JobType {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        let s = self.to_string();
        <&str as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&s.as_str(), buf)
    }
}

/// Job entity as stored. Create and update endpoints return this directly,
/// with `postedBy` as the bare owner id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: i64,
    pub job_type: JobType,
    pub posted_by: StringUuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Job {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            title: String::new(),
            description: String::new(),
            company: String::new(),
            location: String::new(),
            salary: 0,
            job_type: JobType::default(),
            posted_by: StringUuid::nil(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Flat row from the jobs-joined-to-users query
#[derive(Debug, Clone, FromRow)]
pub struct JobWithPoster {
    pub id: StringUuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: i64,
    pub job_type: JobType,
    pub posted_by: StringUuid,
    pub poster_name: String,
    pub poster_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Poster identity embedded in job reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterSummary {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    pub name: String,
    pub email: String,
}

/// Job as returned by list and detail reads, with the poster expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: i64,
    pub job_type: JobType,
    pub posted_by: PosterSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobWithPoster> for JobResponse {
    fn from(row: JobWithPoster) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            company: row.company,
            location: row.location,
            salary: row.salary,
            job_type: row.job_type,
            posted_by: PosterSummary {
                id: row.posted_by,
                name: row.poster_name,
                email: row.poster_email,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Payload for creating a job
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 255))]
    pub company: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    pub salary: Option<i64>,
    pub job_type: Option<JobType>,
}

/// Payload for updating a job. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobInput {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub company: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    pub salary: Option<i64>,
    pub job_type: Option<JobType>,
}

/// Exact-match filters for the public job list
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub company: Option<String>,
}
