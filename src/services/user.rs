//! User service
//!
//! Implements business logic for accounts and authentication:
//! - Signup with role selection and duplicate-username rejection
//! - Login returning a signed session token
//!
//! Login failures are deliberately uniform: a missing account and a wrong
//! password produce the same error, so the endpoint never leaks which
//! usernames exist.

use crate::db::repositories::UserRepository;
use crate::models::{User, UserRole};
use crate::services::password::{hash_password, verify_password};
use crate::services::token::TokenIssuer;
use anyhow::Context;
use std::sync::Arc;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (bad username or bad password, on purpose
    /// indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Username already taken
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed session token
    pub token: String,
    /// Role of the logged-in user
    pub role: UserRole,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// User service for signup and login
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
}

impl UserService {
    /// Create a new user service
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: TokenIssuer) -> Self {
        Self { user_repo, tokens }
    }

    /// Register a new account with the chosen role.
    ///
    /// The role is fixed at signup; there is no role change later.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, UserServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username is required".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Password is required".to_string(),
            ));
        }

        if self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to check username availability")?
            .is_some()
        {
            return Err(UserServiceError::UsernameTaken(username.to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = User::new(username.to_string(), password_hash, role);

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        tracing::info!(user_id = created.id, role = %created.role, "User registered");

        Ok(created)
    }

    /// Authenticate a user and mint a session token.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to look up user")?
            .ok_or(UserServiceError::InvalidCredentials)?;

        let matches = verify_password(password, &user.password_hash)?;
        if !matches {
            return Err(UserServiceError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id, user.role)
            .context("Failed to issue session token")?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginOutcome {
            token,
            role: user.role,
            expires_in: self.tokens.ttl_seconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxUserRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup_service() -> UserService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let repo = SqlxUserRepository::shared(pool);
        let tokens = TokenIssuer::new("test-secret-for-user-service-tests".to_string(), 60);
        UserService::new(repo, tokens)
    }

    #[tokio::test]
    async fn test_signup_creates_user() {
        let service = setup_service().await;

        let user = service
            .signup("alice", "secret123", UserRole::Employer)
            .await
            .expect("Signup should succeed");

        assert!(user.id > 0);
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, UserRole::Employer);
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_username() {
        let service = setup_service().await;

        service
            .signup("alice", "secret123", UserRole::Employer)
            .await
            .expect("First signup should succeed");

        let result = service.signup("alice", "other_pass", UserRole::JobSeeker).await;

        assert!(matches!(result, Err(UserServiceError::UsernameTaken(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_blank_username() {
        let service = setup_service().await;

        let result = service.signup("   ", "secret123", UserRole::JobSeeker).await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_empty_password() {
        let service = setup_service().await;

        let result = service.signup("bob", "", UserRole::JobSeeker).await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_login_success_returns_token_and_role() {
        let service = setup_service().await;
        service
            .signup("alice", "secret123", UserRole::Admin)
            .await
            .expect("Signup should succeed");

        let outcome = service
            .login("alice", "secret123")
            .await
            .expect("Login should succeed");

        assert!(!outcome.token.is_empty());
        assert_eq!(outcome.role, UserRole::Admin);
        assert_eq!(outcome.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = setup_service().await;
        service
            .signup("alice", "secret123", UserRole::Employer)
            .await
            .expect("Signup should succeed");

        let result = service.login("alice", "wrong").await;

        assert!(matches!(result, Err(UserServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_same_error_as_wrong_password() {
        let service = setup_service().await;
        service
            .signup("alice", "secret123", UserRole::Employer)
            .await
            .expect("Signup should succeed");

        let unknown = service.login("nobody", "secret123").await;
        let wrong = service.login("alice", "wrong").await;

        assert!(matches!(unknown, Err(UserServiceError::InvalidCredentials)));
        assert!(matches!(wrong, Err(UserServiceError::InvalidCredentials)));
    }
}
