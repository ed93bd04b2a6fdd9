//! Application business logic

use crate::domain::{
    Application, ApplicationApplicantRow, ApplicationJobRow, ApplyInput, StringUuid,
    UpdateStatusInput,
};
use crate::error::{AppError, Result};
use crate::repository::{ApplicationRepository, JobRepository};
use std::sync::Arc;
use validator::Validate;

pub struct ApplicationService<A: ApplicationRepository, J: JobRepository> {
    repo: Arc<A>,
    job_repo: Arc<J>,
}

impl<A: ApplicationRepository, J: JobRepository> ApplicationService<A, J> {
    pub fn new(repo: Arc<A>, job_repo: Arc<J>) -> Self {
        Self { repo, job_repo }
    }

    /// Apply to a job. The existence check gives a friendly duplicate error
    /// under sequential calls; the unique key on (job_id, applicant_id)
    /// closes the race window under concurrent ones. A resume (URL or
    /// filename) is required.
    pub async fn apply(
        &self,
        applicant_id: StringUuid,
        job_id: StringUuid,
        input: ApplyInput,
    ) -> Result<Application> {
        input.validate()?;

        if self.job_repo.find_by_id(job_id).await?.is_none() {
            return Err(AppError::NotFound("Job not found".to_string()));
        }

        if self.repo.exists_for(job_id, applicant_id).await? {
            return Err(AppError::BadRequest(
                "You have already applied to this job".to_string(),
            ));
        }

        let resume = match input.resume.as_deref().map(str::trim) {
            Some(resume) if !resume.is_empty() => resume,
            _ => return Err(AppError::BadRequest("Resume is required".to_string())),
        };

        self.repo.create(job_id, applicant_id, resume).await
    }

    pub async fn my_applications(&self, applicant_id: StringUuid) -> Result<Vec<ApplicationJobRow>> {
        self.repo.list_by_applicant(applicant_id).await
    }

    pub async fn applications_for_job(
        &self,
        job_id: StringUuid,
    ) -> Result<Vec<ApplicationApplicantRow>> {
        self.repo.list_by_job(job_id).await
    }

    pub async fn get(&self, id: StringUuid) -> Result<Application> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))
    }

    /// Set the status. An absent status in the body keeps the current one.
    pub async fn update_status(
        &self,
        id: StringUuid,
        input: UpdateStatusInput,
    ) -> Result<Application> {
        let current = self.get(id).await?;
        let status = input.status.unwrap_or(current.status);
        self.repo.update_status(id, status).await
    }
}
