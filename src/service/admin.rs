//! Admin moderation business logic

use crate::domain::{JobWithPoster, StringUuid, User};
use crate::error::{AppError, Result};
use crate::repository::{JobRepository, UserRepository};
use std::sync::Arc;

pub struct AdminService<U: UserRepository, J: JobRepository> {
    user_repo: Arc<U>,
    job_repo: Arc<J>,
}

impl<U: UserRepository, J: JobRepository> AdminService<U, J> {
    pub fn new(user_repo: Arc<U>, job_repo: Arc<J>) -> Self {
        Self {
            user_repo,
            job_repo,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo.list().await
    }

    pub async fn get_user(&self, id: StringUuid) -> Result<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn delete_user(&self, id: StringUuid) -> Result<()> {
        self.user_repo.delete(id).await
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobWithPoster>> {
        self.job_repo.list_all().await
    }

    pub async fn delete_job(&self, id: StringUuid) -> Result<()> {
        self.job_repo.delete(id).await
    }
}
