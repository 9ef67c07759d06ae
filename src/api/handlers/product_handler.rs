//! Product handlers.

use std::str::FromStr;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::extractors::{ValidatedId, ValidatedJson};
use crate::api::AppState;
use crate::config::{API_VERSION, META_PRODUCT_LIST, META_PRODUCT_PRICE_RANGE, META_PRODUCT_SEARCH};
use crate::domain::{
    CreateProductRequest, DeletedProduct, ProductResponse, UpdateProductRequest,
};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, ResponseMetadata};

/// Name-search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    name: Option<String>,
}

/// Price-range query parameters, kept as text so parse failures
/// produce the pipeline's message instead of a framework rejection
#[derive(Debug, Deserialize)]
pub struct PriceRangeQuery {
    min: Option<String>,
    max: Option<String>,
}

/// Product service health payload
#[derive(Serialize)]
struct ProductServiceHealth {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    features: Vec<&'static str>,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/health", get(health))
        .route("/search", get(search_products))
        .route("/price-range", get(products_by_price_range))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductResponse>>)> {
    let product = state
        .product_service
        .create_product(payload.name, payload.price, payload.description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            ProductResponse::from(product),
            "Product created successfully",
        )),
    ))
}

/// List all products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "List of all products", body = Vec<ProductResponse>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProductResponse>>>> {
    let started = Instant::now();
    let products = state.product_service.list_products().await?;
    let products: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    let metadata = ResponseMetadata::with_execution_time(
        META_PRODUCT_LIST,
        products.len() as u64,
        started.elapsed().as_millis() as u64,
    );

    Ok(Json(ApiResponse::success_with_metadata(
        products,
        "Products retrieved successfully",
        metadata,
    )))
}

/// Get product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Invalid ID parameter"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<ProductResponse>>> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(ApiResponse::success(
        ProductResponse::from(product),
        "Product found",
    )))
}

/// Update product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<ProductResponse>>> {
    if let Some(body_id) = payload.id {
        if body_id != id {
            return Err(AppError::bad_request("Path ID and body ID must match"));
        }
    }

    let product = state
        .product_service
        .update_product(id, payload.name, payload.price, payload.description)
        .await?;

    Ok(Json(ApiResponse::success(
        ProductResponse::from(product),
        "Product updated successfully",
    )))
}

/// Delete product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeletedProduct),
        (status = 400, description = "Invalid ID parameter"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<DeletedProduct>>> {
    let deleted = state.product_service.delete_product(id).await?;
    Ok(Json(ApiResponse::success(
        deleted,
        "Product deleted successfully",
    )))
}

/// Search products by name
#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Products",
    params(
        ("name" = String, Query, description = "Substring to match against product names")
    ),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 400, description = "Missing or blank name parameter")
    )
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductResponse>>>> {
    let pattern = match query.name.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Err(AppError::bad_request(
                "The 'name' query parameter is required",
            ))
        }
    };

    let products = state.product_service.search_products(pattern).await?;
    let products: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    let message = format!("Found {} products matching '{}'", products.len(), pattern);
    let metadata = ResponseMetadata::with_total(META_PRODUCT_SEARCH, products.len() as u64);

    Ok(Json(ApiResponse::success_with_metadata(
        products, message, metadata,
    )))
}

/// List products inside a price range
#[utoipa::path(
    get,
    path = "/api/products/price-range",
    tag = "Products",
    params(
        ("min" = f64, Query, description = "Lower price bound, inclusive"),
        ("max" = f64, Query, description = "Upper price bound, inclusive")
    ),
    responses(
        (status = 200, description = "Products inside the range", body = Vec<ProductResponse>),
        (status = 400, description = "Missing or invalid bounds")
    )
)]
pub async fn products_by_price_range(
    State(state): State<AppState>,
    Query(query): Query<PriceRangeQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductResponse>>>> {
    let (Some(min_raw), Some(max_raw)) = (query.min.as_deref(), query.max.as_deref()) else {
        return Err(AppError::bad_request(
            "The 'min' and 'max' query parameters are required",
        ));
    };

    let (Ok(min), Ok(max)) = (Decimal::from_str(min_raw.trim()), Decimal::from_str(max_raw.trim()))
    else {
        return Err(AppError::bad_request(
            "The 'min' and 'max' query parameters must be valid numbers",
        ));
    };

    let products = state
        .product_service
        .products_in_price_range(min, max)
        .await?;
    let products: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    let message = format!(
        "Found {} products between {} and {}",
        products.len(),
        min,
        max
    );
    let metadata = ResponseMetadata::with_total(META_PRODUCT_PRICE_RANGE, products.len() as u64);

    Ok(Json(ApiResponse::success_with_metadata(
        products, message, metadata,
    )))
}

/// Product service health check
async fn health() -> Json<ApiResponse<ProductServiceHealth>> {
    let health = ProductServiceHealth {
        status: "UP",
        service: "ProductService",
        version: API_VERSION,
        features: vec![
            "CRUD operations",
            "Search by name",
            "Filter by price range",
        ],
    };

    Json(ApiResponse::success(health, "Product service is running"))
}
