//! Product service - Handles product-related business logic.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::{DeletedProduct, Product};
use crate::errors::{AppError, AppResult};
use crate::infra::ProductRepository;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Create a product
    async fn create_product(
        &self,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
    ) -> AppResult<Product>;

    /// Get product by ID
    async fn get_product(&self, id: i64) -> AppResult<Product>;

    /// List all products
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Update product details; `None` fields keep their stored values
    async fn update_product(
        &self,
        id: i64,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
    ) -> AppResult<Product>;

    /// Delete product by ID
    async fn delete_product(&self, id: i64) -> AppResult<DeletedProduct>;

    /// Case-insensitive name search
    async fn search_products(&self, name_pattern: &str) -> AppResult<Vec<Product>>;

    /// Products priced inside the inclusive range
    async fn products_in_price_range(&self, min: Decimal, max: Decimal)
        -> AppResult<Vec<Product>>;
}

/// Concrete implementation of ProductService.
pub struct ProductManager {
    repository: Arc<dyn ProductRepository>,
}

impl ProductManager {
    /// Create new product service instance
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn create_product(
        &self,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
    ) -> AppResult<Product> {
        // Request validation already ran; these guards cover non-HTTP callers.
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => return Err(AppError::bad_request("Name is required")),
        };
        let Some(price) = price else {
            return Err(AppError::bad_request("Price is required"));
        };
        if price <= Decimal::ZERO {
            return Err(AppError::bad_request("Price must be greater than 0"));
        }
        let description = description.map(|d| d.trim().to_string());

        let product = self.repository.save(name, price, description).await?;
        tracing::info!(product_id = product.id, "product created");
        Ok(product)
    }

    async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.repository.find_all().await.map_err(AppError::from)
    }

    async fn update_product(
        &self,
        id: i64,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
    ) -> AppResult<Product> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        // The price after merging absent fields must still be positive.
        let effective_price = price.unwrap_or(existing.price);
        if effective_price <= Decimal::ZERO {
            return Err(AppError::bad_request("Price must be greater than 0"));
        }

        let name = name.map(|n| n.trim().to_string());
        let description = description.map(|d| d.trim().to_string());

        self.repository
            .update(id, name, price, description)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))
    }

    async fn delete_product(&self, id: i64) -> AppResult<DeletedProduct> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        let deleted = self.repository.delete_by_id(id).await?;
        if !deleted {
            return Err(AppError::not_found("Product"));
        }

        tracing::info!(product_id = existing.id, "product deleted");
        Ok(DeletedProduct {
            id: existing.id,
            deleted_at: chrono::Utc::now(),
        })
    }

    async fn search_products(&self, name_pattern: &str) -> AppResult<Vec<Product>> {
        let pattern = name_pattern.trim();
        if pattern.is_empty() {
            return Err(AppError::bad_request("Search pattern must not be empty"));
        }
        self.repository
            .find_by_name_containing(pattern)
            .await
            .map_err(AppError::from)
    }

    async fn products_in_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> AppResult<Vec<Product>> {
        if min > max {
            return Err(AppError::bad_request(
                "Minimum price must not exceed maximum price",
            ));
        }
        if min < Decimal::ZERO {
            return Err(AppError::bad_request("Minimum price must not be negative"));
        }
        self.repository
            .find_by_price_between(min, max)
            .await
            .map_err(AppError::from)
    }
}
