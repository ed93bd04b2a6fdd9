//! Job business logic

use crate::domain::{CreateJobInput, Job, JobFilter, JobWithPoster, StringUuid, UpdateJobInput};
use crate::error::{AppError, Result};
use crate::repository::JobRepository;
use std::sync::Arc;
use validator::Validate;

pub struct JobService<R: JobRepository> {
    repo: Arc<R>,
}

impl<R: JobRepository> JobService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, posted_by: StringUuid, input: CreateJobInput) -> Result<Job> {
        input.validate()?;
        self.repo.create(posted_by, &input).await
    }

    pub async fn get(&self, id: StringUuid) -> Result<Job> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    pub async fn get_with_poster(&self, id: StringUuid) -> Result<JobWithPoster> {
        self.repo
            .find_with_poster(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    pub async fn list(
        &self,
        filter: &JobFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<JobWithPoster>, i64)> {
        // Saturate so an absurd page number yields an empty page, not an
        // arithmetic overflow or a negative OFFSET.
        let offset = page.saturating_sub(1).saturating_mul(limit);
        let jobs = self.repo.list(filter, offset, limit).await?;
        let total = self.repo.count(filter).await?;
        Ok((jobs, total))
    }

    pub async fn update(&self, id: StringUuid, input: UpdateJobInput) -> Result<Job> {
        input.validate()?;
        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: StringUuid) -> Result<()> {
        self.repo.delete(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<JobWithPoster>> {
        self.repo.list_all().await
    }
}
