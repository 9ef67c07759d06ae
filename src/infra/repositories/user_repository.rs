//! User repository: trait and SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::infra::storage::StorageResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every capability the service layer needs lives on this trait; callers
/// never depend on a concrete store. All methods fail with a storage fault.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn save(&self, name: String, email: String) -> StorageResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<User>>;

    /// List all users, oldest first
    async fn find_all(&self) -> StorageResult<Vec<User>>;

    /// Whether a user with this email already exists
    async fn exists_by_email(&self, email: &str) -> StorageResult<bool>;

    /// Update the given fields, returning the stored row or `None` when absent
    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
    ) -> StorageResult<Option<User>>;

    /// Delete by ID, reporting whether a row was removed
    async fn delete_by_id(&self, id: i64) -> StorageResult<bool>;
}

/// Concrete implementation of UserRepository over SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, name: String, email: String) -> StorageResult<User> {
        let now = chrono::Utc::now();
        let active = ActiveModel {
            name: Set(name),
            email: Set(email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_all(&self) -> StorageResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn exists_by_email(&self, email: &str) -> StorageResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
    ) -> StorageResult<Option<User>> {
        let Some(existing) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(User::from(model)))
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
