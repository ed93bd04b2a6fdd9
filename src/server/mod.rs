//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::migration;
use crate::repository::{
    application::ApplicationRepositoryImpl, job::JobRepositoryImpl, user::UserRepositoryImpl,
};
use crate::service::{AdminService, ApplicationService, AuthService, JobService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub auth_service: Arc<AuthService<UserRepositoryImpl>>,
    pub job_service: Arc<JobService<JobRepositoryImpl>>,
    pub application_service:
        Arc<ApplicationService<ApplicationRepositoryImpl, JobRepositoryImpl>>,
    pub admin_service: Arc<AdminService<UserRepositoryImpl, JobRepositoryImpl>>,
    pub jwt_manager: JwtManager,
}

/// Implement HasServices trait for production AppState
impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type JobRepo = JobRepositoryImpl;
    type ApplicationRepo = ApplicationRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn auth_service(&self) -> &AuthService<Self::UserRepo> {
        &self.auth_service
    }

    fn job_service(&self) -> &JobService<Self::JobRepo> {
        &self.job_service
    }

    fn application_service(&self) -> &ApplicationService<Self::ApplicationRepo, Self::JobRepo> {
        &self.application_service
    }

    fn admin_service(&self) -> &AdminService<Self::UserRepo, Self::JobRepo> {
        &self.admin_service
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Apply pending migrations before accepting traffic
    migration::run_migrations(&config).await?;

    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    // Create repositories
    let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
    let job_repo = Arc::new(JobRepositoryImpl::new(db_pool.clone()));
    let application_repo = Arc::new(ApplicationRepositoryImpl::new(db_pool.clone()));

    // Create JWT manager
    let jwt_manager = JwtManager::new(config.jwt.clone());

    // Create services
    let auth_service = Arc::new(AuthService::new(user_repo.clone(), jwt_manager.clone()));
    let job_service = Arc::new(JobService::new(job_repo.clone()));
    let application_service = Arc::new(ApplicationService::new(
        application_repo,
        job_repo.clone(),
    ));
    let admin_service = Arc::new(AdminService::new(user_repo, job_repo));

    // Create app state
    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        auth_service,
        job_service,
        application_service,
        admin_service,
        jwt_manager,
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with generic state type
///
/// This function is generic over the state type, allowing it to work with
/// both production `AppState` and test implementations that implement `HasServices`.
pub fn build_router<S: HasServices>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Auth endpoints
        .route("/api/auth/register", post(api::auth::register::<S>))
        .route("/api/auth/login", post(api::auth::login::<S>))
        .route("/api/auth/me", get(api::auth::me::<S>))
        // Job endpoints
        .route(
            "/api/jobs",
            get(api::job::list::<S>).post(api::job::create::<S>),
        )
        .route(
            "/api/jobs/{id}",
            get(api::job::get::<S>)
                .put(api::job::update::<S>)
                .delete(api::job::remove::<S>),
        )
        // Application endpoints
        .route(
            "/api/applications/me",
            get(api::application::my_applications::<S>),
        )
        .route(
            "/api/applications/job/{job_id}",
            get(api::application::for_job::<S>),
        )
        .route(
            "/api/applications/{job_id}",
            post(api::application::apply::<S>),
        )
        .route(
            "/api/applications/{id}/status",
            put(api::application::update_status::<S>),
        )
        // Admin endpoints
        .route("/api/admin/users", get(api::admin::list_users::<S>))
        .route(
            "/api/admin/users/{id}",
            delete(api::admin::delete_user::<S>),
        )
        .route("/api/admin/jobs", get(api::admin::list_jobs::<S>))
        .route("/api/admin/jobs/{id}", delete(api::admin::delete_job::<S>))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
