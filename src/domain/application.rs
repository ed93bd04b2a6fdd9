//! Application domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Pipeline stage of an application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Rejected,
    Hired,
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "applied" => Ok(ApplicationStatus::Applied),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "hired" => Ok(ApplicationStatus::Hired),
            _ => Err(format!("Unknown application status: {}", s)),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Applied => write!(f, "Applied"),
            ApplicationStatus::Shortlisted => write!(f, "Shortlisted"),
            ApplicationStatus::Rejected => write!(f, "Rejected"),
            ApplicationStatus::Hired => write!(f, "Hired"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for ApplicationStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for ApplicationStatus {
    fn decode(value: sqlx::mysql::MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for ApplicationStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        let s = self.to_string();
        <&str as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&s.as_str(), buf)
    }
}

/// Application entity. `job` and `applicant` serialize as bare ids; reads that
/// need the related records go through the joined response types below.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    #[serde(rename = "job")]
    pub job_id: StringUuid,
    #[serde(rename = "applicant")]
    pub applicant_id: StringUuid,
    pub resume: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Application {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            job_id: StringUuid::nil(),
            applicant_id: StringUuid::nil(),
            resume: String::new(),
            status: ApplicationStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Flat row for an applicant's own list, joined to the job
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationJobRow {
    pub id: StringUuid,
    pub job_id: StringUuid,
    pub applicant_id: StringUuid,
    pub resume: String,
    pub status: ApplicationStatus,
    pub job_title: String,
    pub job_company: String,
    pub job_location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job identity embedded in an applicant's list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    pub title: String,
    pub company: String,
    pub location: String,
}

/// Application with the job expanded, for GET /api/applications/me
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    pub job: JobSummary,
    pub applicant: StringUuid,
    pub resume: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationJobRow> for ApplicationWithJob {
    fn from(row: ApplicationJobRow) -> Self {
        Self {
            id: row.id,
            job: JobSummary {
                id: row.job_id,
                title: row.job_title,
                company: row.job_company,
                location: row.job_location,
            },
            applicant: row.applicant_id,
            resume: row.resume,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Flat row for a job's applicant list, joined to the user
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationApplicantRow {
    pub id: StringUuid,
    pub job_id: StringUuid,
    pub applicant_id: StringUuid,
    pub resume: String,
    pub status: ApplicationStatus,
    pub applicant_name: String,
    pub applicant_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Applicant identity embedded in a job's applicant list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantSummary {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    pub name: String,
    pub email: String,
}

/// Application with the applicant expanded, for GET /api/applications/job/{jobId}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithApplicant {
    #[serde(rename = "_id")]
    pub id: StringUuid,
    pub job: StringUuid,
    pub applicant: ApplicantSummary,
    pub resume: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationApplicantRow> for ApplicationWithApplicant {
    fn from(row: ApplicationApplicantRow) -> Self {
        Self {
            id: row.id,
            job: row.job_id,
            applicant: ApplicantSummary {
                id: row.applicant_id,
                name: row.applicant_name,
                email: row.applicant_email,
            },
            resume: row.resume,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Payload for applying to a job. The resume is required; it stays an
/// `Option` here so absence surfaces as a domain 400 rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ApplyInput {
    #[validate(length(max = 2048))]
    pub resume: Option<String>,
}

/// Payload for a status change. An absent status keeps the current one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusInput {
    pub status: Option<ApplicationStatus>,
}
