//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{ProductService, Services, UserService};

/// Application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Product service
    pub product_service: Arc<dyn ProductService>,
}

impl AppState {
    /// Create application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        product_service: Arc<dyn ProductService>,
    ) -> Self {
        Self {
            user_service,
            product_service,
        }
    }

    /// Create application state backed by the database.
    pub fn from_database(database: &Database) -> Self {
        let services = Services::from_connection(database.get_connection());

        Self {
            user_service: services.user_service,
            product_service: services.product_service,
        }
    }
}
