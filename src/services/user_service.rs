//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user, rejecting duplicate emails up front
    async fn create_user(&self, name: Option<String>, email: Option<String>) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update user details; `None` fields keep their stored values
    async fn update_user(
        &self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repository: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, name: Option<String>, email: Option<String>) -> AppResult<User> {
        // Request validation already ran; these guards cover non-HTTP callers.
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => return Err(AppError::bad_request("Name is required")),
        };
        let email = match email {
            Some(e) if !e.trim().is_empty() => e.trim().to_string(),
            _ => return Err(AppError::bad_request("Email is required")),
        };

        if self.repository.exists_by_email(&email).await? {
            return Err(AppError::bad_request("A user with that email already exists"));
        }

        let user = self.repository.save(name, email).await?;
        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.find_all().await.map_err(AppError::from)
    }

    async fn update_user(
        &self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User> {
        let name = name.map(|n| n.trim().to_string());
        let email = email.map(|e| e.trim().to_string());

        // Duplicate emails surface through the unique constraint as a conflict.
        self.repository
            .update(id, name, email)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;
        if !deleted {
            return Err(AppError::not_found("User"));
        }
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
