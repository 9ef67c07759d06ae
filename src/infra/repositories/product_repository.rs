//! Product repository: trait and SeaORM implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::Product;
use crate::infra::storage::StorageResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn save(
        &self,
        name: String,
        price: Decimal,
        description: Option<String>,
    ) -> StorageResult<Product>;

    /// Find product by ID
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>>;

    /// List all products, oldest first
    async fn find_all(&self) -> StorageResult<Vec<Product>>;

    /// Update the given fields, returning the stored row or `None` when absent
    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
    ) -> StorageResult<Option<Product>>;

    /// Delete by ID, reporting whether a row was removed
    async fn delete_by_id(&self, id: i64) -> StorageResult<bool>;

    /// Case-insensitive substring match on the product name
    async fn find_by_name_containing(&self, name: &str) -> StorageResult<Vec<Product>>;

    /// Products whose price falls inside the inclusive range
    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> StorageResult<Vec<Product>>;
}

/// Concrete implementation of ProductRepository over SeaORM
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn save(
        &self,
        name: String,
        price: Decimal,
        description: Option<String>,
    ) -> StorageResult<Product> {
        let now = chrono::Utc::now();
        let active = ActiveModel {
            name: Set(name),
            price: Set(price),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(Product::from(model))
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Product::from))
    }

    async fn find_all(&self) -> StorageResult<Vec<Product>> {
        let models = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
    ) -> StorageResult<Option<Product>> {
        let Some(existing) = ProductEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(price) = price {
            active.price = Set(price);
        }
        if let Some(description) = description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(Product::from(model)))
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        let result = ProductEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_name_containing(&self, name: &str) -> StorageResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::Name.contains(name))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> StorageResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::Price.between(min, max))
            .order_by_asc(product::Column::Price)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }
}
