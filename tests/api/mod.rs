//! API integration tests infrastructure
//!
//! This module provides test utilities for API handler testing without
//! external dependencies: in-memory repository implementations, entity
//! factories and token helpers.

pub mod http;

use async_trait::async_trait;
use chrono::Utc;
use joblane_core::config::JwtConfig;
use joblane_core::domain::{
    Application, ApplicationApplicantRow, ApplicationJobRow, ApplicationStatus, CreateJobInput,
    Job, JobFilter, JobWithPoster, RegisterInput, StringUuid, UpdateJobInput, User, UserRole,
};
use joblane_core::error::{AppError, Result};
use joblane_core::jwt::JwtManager;
use joblane_core::repository::{ApplicationRepository, JobRepository, UserRepository};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Test Configuration
// ============================================================================

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-for-api-testing-purposes".to_string(),
        issuer: "https://joblane.test".to_string(),
        token_ttl_secs: 3600,
    }
}

pub fn create_test_jwt_manager() -> JwtManager {
    JwtManager::new(test_jwt_config())
}

/// Create an access token for a specific user id, signed with the test secret
pub fn create_token_for(user_id: StringUuid) -> String {
    create_test_jwt_manager()
        .create_access_token(user_id)
        .expect("Failed to create test access token")
}

// ============================================================================
// Entity Factories
// ============================================================================

/// Create a test user. The email embeds the id so seeded users never collide.
pub fn create_test_user(id: Option<StringUuid>) -> User {
    let id = id.unwrap_or_else(StringUuid::new_v4);
    User {
        id,
        name: "Test User".to_string(),
        email: format!("user-{}@example.com", id),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$unused".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn create_test_job(posted_by: StringUuid) -> Job {
    Job {
        id: StringUuid::new_v4(),
        title: "Backend Engineer".to_string(),
        description: "Build and operate HTTP APIs".to_string(),
        company: "Acme".to_string(),
        location: "Berlin".to_string(),
        salary: 90000,
        job_type: Default::default(),
        posted_by,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[allow(dead_code)]
pub fn create_test_application(job_id: StringUuid, applicant_id: StringUuid) -> Application {
    Application {
        id: StringUuid::new_v4(),
        job_id,
        applicant_id,
        resume: "https://cv.example/resume.pdf".to_string(),
        status: ApplicationStatus::Applied,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Test Repository Implementations
// ============================================================================

/// Configurable test user repository
pub struct TestUserRepository {
    users: RwLock<Vec<User>>,
}

impl TestUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(vec![]),
        }
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.push(user);
    }

    #[allow(dead_code)]
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for TestUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for TestUserRepository {
    async fn create(
        &self,
        input: &RegisterInput,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User> {
        let user = User {
            id: StringUuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let mut users = self.users.read().await.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut users = self.users.write().await;
        let pos = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        users.remove(pos);
        Ok(())
    }
}

/// Configurable test job repository.
///
/// Holds a handle to the user store so the poster join behaves like the
/// production SQL: jobs whose poster no longer exists drop out of reads.
pub struct TestJobRepository {
    jobs: RwLock<Vec<Job>>,
    users: Arc<TestUserRepository>,
}

impl TestJobRepository {
    pub fn new(users: Arc<TestUserRepository>) -> Self {
        Self {
            jobs: RwLock::new(vec![]),
            users,
        }
    }

    pub async fn add_job(&self, job: Job) {
        self.jobs.write().await.push(job);
    }

    #[allow(dead_code)]
    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    async fn join_poster(&self, job: &Job) -> Option<JobWithPoster> {
        let users = self.users.users.read().await;
        let poster = users.iter().find(|u| u.id == job.posted_by)?;
        Some(JobWithPoster {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary: job.salary,
            job_type: job.job_type,
            posted_by: job.posted_by,
            poster_name: poster.name.clone(),
            poster_email: poster.email.clone(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
    }

    fn matches(job: &Job, filter: &JobFilter) -> bool {
        if let Some(location) = &filter.location {
            if &job.location != location {
                return false;
            }
        }
        if let Some(job_type) = filter.job_type {
            if job.job_type != job_type {
                return false;
            }
        }
        if let Some(company) = &filter.company {
            if &job.company != company {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl JobRepository for TestJobRepository {
    async fn create(&self, posted_by: StringUuid, input: &CreateJobInput) -> Result<Job> {
        let job = Job {
            id: StringUuid::new_v4(),
            title: input.title.clone(),
            description: input.description.clone(),
            company: input.company.clone(),
            location: input.location.clone(),
            salary: input.salary.unwrap_or(0),
            job_type: input.job_type.unwrap_or_default(),
            posted_by,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Job>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn find_with_poster(&self, id: StringUuid) -> Result<Option<JobWithPoster>> {
        let job = match self.find_by_id(id).await? {
            Some(job) => job,
            None => return Ok(None),
        };
        Ok(self.join_poster(&job).await)
    }

    async fn list(
        &self,
        filter: &JobFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<JobWithPoster>> {
        let mut jobs: Vec<Job> = self
            .jobs
            .read()
            .await
            .iter()
            .filter(|j| Self::matches(j, filter))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut rows = Vec::new();
        for job in jobs.into_iter().skip(offset as usize).take(limit as usize) {
            if let Some(row) = self.join_poster(&job).await {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().filter(|j| Self::matches(j, filter)).count() as i64)
    }

    async fn list_all(&self) -> Result<Vec<JobWithPoster>> {
        let mut jobs = self.jobs.read().await.clone();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut rows = Vec::new();
        for job in jobs {
            if let Some(row) = self.join_poster(&job).await {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    async fn update(&self, id: StringUuid, input: &UpdateJobInput) -> Result<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        if let Some(title) = &input.title {
            job.title = title.clone();
        }
        if let Some(description) = &input.description {
            job.description = description.clone();
        }
        if let Some(company) = &input.company {
            job.company = company.clone();
        }
        if let Some(location) = &input.location {
            job.location = location.clone();
        }
        if let Some(salary) = input.salary {
            job.salary = salary;
        }
        if let Some(job_type) = input.job_type {
            job.job_type = job_type;
        }
        job.updated_at = Utc::now();
        Ok(job.clone())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut jobs = self.jobs.write().await;
        let pos = jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
        jobs.remove(pos);
        Ok(())
    }
}

/// Configurable test application repository.
///
/// Joins against the user and job stores the way the production queries do.
pub struct TestApplicationRepository {
    applications: RwLock<Vec<Application>>,
    users: Arc<TestUserRepository>,
    jobs: Arc<TestJobRepository>,
}

impl TestApplicationRepository {
    pub fn new(users: Arc<TestUserRepository>, jobs: Arc<TestJobRepository>) -> Self {
        Self {
            applications: RwLock::new(vec![]),
            users,
            jobs,
        }
    }

    #[allow(dead_code)]
    pub async fn add_application(&self, application: Application) {
        self.applications.write().await.push(application);
    }
}

#[async_trait]
impl ApplicationRepository for TestApplicationRepository {
    async fn create(
        &self,
        job_id: StringUuid,
        applicant_id: StringUuid,
        resume: &str,
    ) -> Result<Application> {
        let mut applications = self.applications.write().await;
        // Mirrors the unique key on (job_id, applicant_id)
        if applications
            .iter()
            .any(|a| a.job_id == job_id && a.applicant_id == applicant_id)
        {
            return Err(AppError::BadRequest(
                "You have already applied to this job".to_string(),
            ));
        }

        let application = Application {
            id: StringUuid::new_v4(),
            job_id,
            applicant_id,
            resume: resume.to_string(),
            status: ApplicationStatus::Applied,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        applications.push(application.clone());
        Ok(application)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Application>> {
        let applications = self.applications.read().await;
        Ok(applications.iter().find(|a| a.id == id).cloned())
    }

    async fn exists_for(&self, job_id: StringUuid, applicant_id: StringUuid) -> Result<bool> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .any(|a| a.job_id == job_id && a.applicant_id == applicant_id))
    }

    async fn list_by_applicant(&self, applicant_id: StringUuid) -> Result<Vec<ApplicationJobRow>> {
        let mut applications: Vec<Application> = self
            .applications
            .read()
            .await
            .iter()
            .filter(|a| a.applicant_id == applicant_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let jobs = self.jobs.jobs.read().await;
        let mut rows = Vec::new();
        for application in applications {
            if let Some(job) = jobs.iter().find(|j| j.id == application.job_id) {
                rows.push(ApplicationJobRow {
                    id: application.id,
                    job_id: application.job_id,
                    applicant_id: application.applicant_id,
                    resume: application.resume.clone(),
                    status: application.status,
                    job_title: job.title.clone(),
                    job_company: job.company.clone(),
                    job_location: job.location.clone(),
                    created_at: application.created_at,
                    updated_at: application.updated_at,
                });
            }
        }
        Ok(rows)
    }

    async fn list_by_job(&self, job_id: StringUuid) -> Result<Vec<ApplicationApplicantRow>> {
        let mut applications: Vec<Application> = self
            .applications
            .read()
            .await
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let users = self.users.users.read().await;
        let mut rows = Vec::new();
        for application in applications {
            if let Some(applicant) = users.iter().find(|u| u.id == application.applicant_id) {
                rows.push(ApplicationApplicantRow {
                    id: application.id,
                    job_id: application.job_id,
                    applicant_id: application.applicant_id,
                    resume: application.resume.clone(),
                    status: application.status,
                    applicant_name: applicant.name.clone(),
                    applicant_email: applicant.email.clone(),
                    created_at: application.created_at,
                    updated_at: application.updated_at,
                });
            }
        }
        Ok(rows)
    }

    async fn update_status(
        &self,
        id: StringUuid,
        status: ApplicationStatus,
    ) -> Result<Application> {
        let mut applications = self.applications.write().await;
        let application = applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
        application.status = status;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }
}
