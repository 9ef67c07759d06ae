//! Domain layer - Core business entities
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

mod product;
mod user;

pub use product::{
    CreateProductRequest, DeletedProduct, Product, ProductResponse, UpdateProductRequest,
};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserResponse};
