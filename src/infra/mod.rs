//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations, and repositories
//! - Storage fault capture and classification

pub mod classifier;
pub mod db;
pub mod repositories;
pub mod storage;

pub use classifier::StorageClassifier;
pub use db::{Database, Migrator};
pub use repositories::{ProductRepository, ProductStore, UserRepository, UserStore};
pub use storage::{StorageError, StorageResult};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockProductRepository, MockUserRepository};
