//! Storefront API - REST backend for users and products
//!
//! CRUD over two resources behind a uniform response envelope, with a
//! request-validation pipeline and structured storage-error classification.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and request DTOs
//! - **validation**: Declarative rule tables and the validation engine
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories, fault classification)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (response envelope)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Product, User};
pub use errors::{AppError, AppResult};
pub use types::{ApiResponse, ErrorDetail};
