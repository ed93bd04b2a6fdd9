//! Authentication business logic

use crate::domain::{AuthResponse, LoginInput, RegisterInput, StringUuid, User};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::UserRepository;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
    jwt_manager: JwtManager,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, jwt_manager: JwtManager) -> Self {
        Self { repo, jwt_manager }
    }

    /// Register a new account and issue a token for it.
    /// The caller picks their own role; the storage default is `user`.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResponse> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let role = input.role.unwrap_or_default();
        let user = self.repo.create(&input, &password_hash, role).await?;

        self.auth_response(user)
    }

    /// Verify an email/password pair and issue a token. Unknown email and
    /// wrong password fail identically so responses cannot enumerate users.
    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse> {
        match self.repo.find_by_email(&input.email).await? {
            Some(user) if verify_password(&input.password, &user.password_hash)? => {
                self.auth_response(user)
            }
            _ => Err(AppError::Unauthorized("Invalid credentials".to_string())),
        }
    }

    /// Load the user behind a verified token. Used on every authenticated
    /// request, so deleted accounts lose access immediately.
    pub async fn current_user(&self, id: StringUuid) -> Result<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Not authorized, user not found".to_string()))
    }

    fn auth_response(&self, user: User) -> Result<AuthResponse> {
        let token = self.jwt_manager.create_access_token(user.id)?;
        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        })
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against its hash
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    use argon2::{PasswordHash, PasswordVerifier};

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
