//! Service container - wires repositories into services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{ProductManager, ProductService, UserManager, UserService};
use crate::infra::{ProductStore, UserStore};

/// Holds one instance of every application service.
pub struct Services {
    pub user_service: Arc<dyn UserService>,
    pub product_service: Arc<dyn ProductService>,
}

impl Services {
    /// Create a service container from explicit service instances
    pub fn new(
        user_service: Arc<dyn UserService>,
        product_service: Arc<dyn ProductService>,
    ) -> Self {
        Self {
            user_service,
            product_service,
        }
    }

    /// Create a service container backed by SeaORM stores
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let user_service = Arc::new(UserManager::new(Arc::new(UserStore::new(db.clone()))));
        let product_service = Arc::new(ProductManager::new(Arc::new(ProductStore::new(db))));

        Self {
            user_service,
            product_service,
        }
    }
}
