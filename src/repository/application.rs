//! Application repository

use crate::domain::{
    Application, ApplicationApplicantRow, ApplicationJobRow, ApplicationStatus, StringUuid,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(
        &self,
        job_id: StringUuid,
        applicant_id: StringUuid,
        resume: &str,
    ) -> Result<Application>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Application>>;
    async fn exists_for(&self, job_id: StringUuid, applicant_id: StringUuid) -> Result<bool>;
    async fn list_by_applicant(&self, applicant_id: StringUuid) -> Result<Vec<ApplicationJobRow>>;
    async fn list_by_job(&self, job_id: StringUuid) -> Result<Vec<ApplicationApplicantRow>>;
    async fn update_status(&self, id: StringUuid, status: ApplicationStatus) -> Result<Application>;
}

pub struct ApplicationRepositoryImpl {
    pool: MySqlPool,
}

impl ApplicationRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// The (job_id, applicant_id) pair is unique at the storage level, so a
/// concurrent double-apply surfaces here as a duplicate-key error rather
/// than slipping past the service's existence check. MySQL reports
/// ER_DUP_ENTRY with SQLSTATE 23000, which sqlx classifies as a unique
/// violation.
fn map_duplicate_application(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            return AppError::BadRequest("You have already applied to this job".to_string());
        }
    }
    AppError::Database(error)
}

#[async_trait]
impl ApplicationRepository for ApplicationRepositoryImpl {
    async fn create(
        &self,
        job_id: StringUuid,
        applicant_id: StringUuid,
        resume: &str,
    ) -> Result<Application> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO applications (id, job_id, applicant_id, resume, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(job_id)
        .bind(applicant_id)
        .bind(resume)
        .bind(ApplicationStatus::default())
        .execute(&self.pool)
        .await
        .map_err(map_duplicate_application)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create application")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, job_id, applicant_id, resume, status, created_at, updated_at
            FROM applications
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    async fn exists_for(&self, job_id: StringUuid, applicant_id: StringUuid) -> Result<bool> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM applications WHERE job_id = ? AND applicant_id = ?",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0 > 0)
    }

    async fn list_by_applicant(&self, applicant_id: StringUuid) -> Result<Vec<ApplicationJobRow>> {
        let applications = sqlx::query_as::<_, ApplicationJobRow>(
            r#"
            SELECT a.id, a.job_id, a.applicant_id, a.resume, a.status,
                   j.title AS job_title, j.company AS job_company, j.location AS job_location,
                   a.created_at, a.updated_at
            FROM applications a
            INNER JOIN jobs j ON a.job_id = j.id
            WHERE a.applicant_id = ?
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    async fn list_by_job(&self, job_id: StringUuid) -> Result<Vec<ApplicationApplicantRow>> {
        let applications = sqlx::query_as::<_, ApplicationApplicantRow>(
            r#"
            SELECT a.id, a.job_id, a.applicant_id, a.resume, a.status,
                   u.name AS applicant_name, u.email AS applicant_email,
                   a.created_at, a.updated_at
            FROM applications a
            INNER JOIN users u ON a.applicant_id = u.id
            WHERE a.job_id = ?
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    async fn update_status(
        &self,
        id: StringUuid,
        status: ApplicationStatus,
    ) -> Result<Application> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        sqlx::query(
            r#"
            UPDATE applications
            SET status = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update application")))
    }
}
