//! Job repository

use crate::domain::{CreateJobInput, Job, JobFilter, JobWithPoster, StringUuid, UpdateJobInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

/// Columns of the jobs-joined-to-users projection
const JOB_WITH_POSTER_COLUMNS: &str = "j.id, j.title, j.description, j.company, j.location, \
     j.salary, j.job_type, j.posted_by, u.name AS poster_name, u.email AS poster_email, \
     j.created_at, j.updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, posted_by: StringUuid, input: &CreateJobInput) -> Result<Job>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Job>>;
    async fn find_with_poster(&self, id: StringUuid) -> Result<Option<JobWithPoster>>;
    async fn list(&self, filter: &JobFilter, offset: i64, limit: i64) -> Result<Vec<JobWithPoster>>;
    async fn count(&self, filter: &JobFilter) -> Result<i64>;
    async fn list_all(&self) -> Result<Vec<JobWithPoster>>;
    async fn update(&self, id: StringUuid, input: &UpdateJobInput) -> Result<Job>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct JobRepositoryImpl {
    pool: MySqlPool,
}

impl JobRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for JobRepositoryImpl {
    async fn create(&self, posted_by: StringUuid, input: &CreateJobInput) -> Result<Job> {
        let id = StringUuid::new_v4();
        let salary = input.salary.unwrap_or(0);
        let job_type = input.job_type.unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, description, company, location, salary, job_type, posted_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.company)
        .bind(&input.location)
        .bind(salary)
        .bind(job_type)
        .bind(posted_by)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create job")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, description, company, location, salary, job_type, posted_by, created_at, updated_at
            FROM jobs
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn find_with_poster(&self, id: StringUuid) -> Result<Option<JobWithPoster>> {
        let sql = format!(
            "SELECT {} FROM jobs j INNER JOIN users u ON j.posted_by = u.id WHERE j.id = ?",
            JOB_WITH_POSTER_COLUMNS
        );

        let job = sqlx::query_as::<_, JobWithPoster>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(job)
    }

    async fn list(
        &self,
        filter: &JobFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<JobWithPoster>> {
        let mut sql = format!(
            "SELECT {} FROM jobs j INNER JOIN users u ON j.posted_by = u.id WHERE 1=1",
            JOB_WITH_POSTER_COLUMNS
        );

        if filter.location.is_some() {
            sql.push_str(" AND j.location = ?");
        }
        if filter.job_type.is_some() {
            sql.push_str(" AND j.job_type = ?");
        }
        if filter.company.is_some() {
            sql.push_str(" AND j.company = ?");
        }

        sql.push_str(" ORDER BY j.created_at DESC LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, JobWithPoster>(&sql);

        if let Some(ref location) = filter.location {
            query_builder = query_builder.bind(location);
        }
        if let Some(job_type) = filter.job_type {
            query_builder = query_builder.bind(job_type);
        }
        if let Some(ref company) = filter.company {
            query_builder = query_builder.bind(company);
        }
        query_builder = query_builder.bind(limit).bind(offset);

        let jobs = query_builder.fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64> {
        let mut sql = String::from("SELECT COUNT(*) FROM jobs j WHERE 1=1");

        if filter.location.is_some() {
            sql.push_str(" AND j.location = ?");
        }
        if filter.job_type.is_some() {
            sql.push_str(" AND j.job_type = ?");
        }
        if filter.company.is_some() {
            sql.push_str(" AND j.company = ?");
        }

        let mut query_builder = sqlx::query_as::<_, (i64,)>(&sql);

        if let Some(ref location) = filter.location {
            query_builder = query_builder.bind(location);
        }
        if let Some(job_type) = filter.job_type {
            query_builder = query_builder.bind(job_type);
        }
        if let Some(ref company) = filter.company {
            query_builder = query_builder.bind(company);
        }

        let (count,) = query_builder.fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn list_all(&self) -> Result<Vec<JobWithPoster>> {
        let sql = format!(
            "SELECT {} FROM jobs j INNER JOIN users u ON j.posted_by = u.id ORDER BY j.created_at DESC",
            JOB_WITH_POSTER_COLUMNS
        );

        let jobs = sqlx::query_as::<_, JobWithPoster>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(jobs)
    }

    async fn update(&self, id: StringUuid, input: &UpdateJobInput) -> Result<Job> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        let title = input.title.as_ref().unwrap_or(&existing.title);
        let description = input.description.as_ref().unwrap_or(&existing.description);
        let company = input.company.as_ref().unwrap_or(&existing.company);
        let location = input.location.as_ref().unwrap_or(&existing.location);
        let salary = input.salary.unwrap_or(existing.salary);
        let job_type = input.job_type.unwrap_or(existing.job_type);

        sqlx::query(
            r#"
            UPDATE jobs
            SET title = ?, description = ?, company = ?, location = ?, salary = ?, job_type = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(company)
        .bind(location)
        .bind(salary)
        .bind(job_type)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update job")))
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Job not found".to_string()));
        }

        Ok(())
    }
}
