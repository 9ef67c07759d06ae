//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{product_handler, user_handler};
use crate::domain::{
    CreateProductRequest, CreateUserRequest, DeletedProduct, ProductResponse, UpdateProductRequest,
    UpdateUserRequest, UserResponse,
};
use crate::types::{ErrorCategory, ErrorDetail, ResponseMetadata};

/// OpenAPI documentation for the Storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "REST backend with CRUD over users and products, uniform response envelopes, and structured validation errors",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8090", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Product endpoints
        product_handler::create_product,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::search_products,
        product_handler::products_by_price_range,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            CreateUserRequest,
            UpdateUserRequest,
            ProductResponse,
            CreateProductRequest,
            UpdateProductRequest,
            DeletedProduct,
            // Envelope building blocks
            ErrorCategory,
            ErrorDetail,
            ResponseMetadata,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Products", description = "Product management operations")
    )
)]
pub struct ApiDoc;
