//! Integration tests for API endpoints.
//!
//! These tests drive the real router through mock services, so the request
//! pipeline, response envelopes, and status codes are exercised without a
//! database connection.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use storefront_api::api::{create_router, AppState};
use storefront_api::domain::{DeletedProduct, Product, User};
use storefront_api::errors::{AppError, AppResult};
use storefront_api::infra::StorageError;
use storefront_api::services::{ProductService, UserService};
use storefront_api::types::{ApiResponse, ErrorDetail, ResponseMetadata};

// =============================================================================
// Mock Services
// =============================================================================

fn sample_user(id: i64) -> User {
    User {
        id,
        name: "Ana García".to_string(),
        email: "ana@example.com".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_product(id: i64) -> Product {
    Product {
        id,
        name: "Laptop".to_string(),
        price: Decimal::new(99_999, 2),
        description: Some("14-inch ultrabook".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Mock user service with predefined responses. ID 999 is never found and
/// the email `dup@example.com` trips a storage-level uniqueness fault.
struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn create_user(&self, name: Option<String>, email: Option<String>) -> AppResult<User> {
        if email.as_deref() == Some("dup@example.com") {
            return Err(StorageError::new(
                r#"duplicate key value violates unique constraint "users_email_key", detail: Key (email)=(dup@example.com) already exists."#,
            )
            .into());
        }

        let mut user = sample_user(1);
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        if id == 999 {
            return Err(AppError::not_found("User"));
        }
        Ok(sample_user(id))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(vec![sample_user(1), sample_user(2)])
    }

    async fn update_user(
        &self,
        id: i64,
        name: Option<String>,
        _email: Option<String>,
    ) -> AppResult<User> {
        if id == 999 {
            return Err(AppError::not_found("User"));
        }
        let mut user = sample_user(id);
        if let Some(name) = name {
            user.name = name;
        }
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        if id == 999 {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }
}

/// Mock product service. ID 999 is never found and ID 500 trips an
/// unclassifiable storage fault.
struct MockProductService;

#[async_trait]
impl ProductService for MockProductService {
    async fn create_product(
        &self,
        name: Option<String>,
        price: Option<Decimal>,
        description: Option<String>,
    ) -> AppResult<Product> {
        let mut product = sample_product(1);
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = price {
            product.price = price;
        }
        product.description = description;
        Ok(product)
    }

    async fn get_product(&self, id: i64) -> AppResult<Product> {
        if id == 999 {
            return Err(AppError::not_found("Product"));
        }
        if id == 500 {
            return Err(StorageError::new("connection pool exhausted").into());
        }
        Ok(sample_product(id))
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(vec![sample_product(1), sample_product(2)])
    }

    async fn update_product(
        &self,
        id: i64,
        name: Option<String>,
        price: Option<Decimal>,
        _description: Option<String>,
    ) -> AppResult<Product> {
        if id == 999 {
            return Err(AppError::not_found("Product"));
        }
        let mut product = sample_product(id);
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = price {
            product.price = price;
        }
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> AppResult<DeletedProduct> {
        if id == 999 {
            return Err(AppError::not_found("Product"));
        }
        Ok(DeletedProduct {
            id,
            deleted_at: Utc::now(),
        })
    }

    async fn search_products(&self, _name_pattern: &str) -> AppResult<Vec<Product>> {
        Ok(vec![sample_product(1)])
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
        Ok(vec![sample_product(1), sample_product(2)])
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> Router {
    let state = AppState::new(Arc::new(MockUserService), Arc::new(MockProductService));
    create_router(state)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Root and Health Endpoints
// =============================================================================

#[tokio::test]
async fn test_welcome_endpoint() {
    let (status, body) = send(get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Welcome to the Storefront API"));
    assert_eq!(body["data"]["message"], json!("Storefront REST API"));
    assert!(body["data"]["endpoints"].as_array().unwrap().len() >= 10);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("UP"));
    assert_eq!(body["data"]["service"], json!("UserService"));
}

#[tokio::test]
async fn test_product_health_endpoint() {
    let (status, body) = send(get("/api/products/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], json!("ProductService"));
    assert_eq!(body["data"]["features"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_route_returns_enveloped_404() {
    let (status, body) = send(get("/api/unknown")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Route not found"));
}

// =============================================================================
// Request Pipeline
// =============================================================================

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let (status, body) = send(post_raw("/api/users", None, r#"{"name":"Ana"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Content-Type must be application/json"));
}

#[tokio::test]
async fn test_text_content_type_is_rejected() {
    let (status, body) =
        send(post_raw("/api/users", Some("text/plain"), r#"{"name":"Ana"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Content-Type must be application/json"));
}

#[tokio::test]
async fn test_json_suffix_content_type_is_accepted() {
    let payload = json!({"name": "Ana", "email": "ana@example.com"});
    let (status, _) = send(post_raw(
        "/api/users",
        Some("application/vnd.api+json"),
        &payload.to_string(),
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_empty_body_is_rejected() {
    let (status, body) = send(post_raw("/api/users", Some("application/json"), "")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Request body must not be empty"));
}

#[tokio::test]
async fn test_truncated_json_reports_incomplete() {
    let (status, body) = send(post_raw(
        "/api/users",
        Some("application/json"),
        r#"{"name": "Ana""#,
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Incomplete JSON in request body"));
}

#[tokio::test]
async fn test_broken_json_reports_malformed() {
    let (status, body) = send(post_raw(
        "/api/users",
        Some("application/json"),
        "{name: Ana}",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Malformed JSON in request body"));
}

#[tokio::test]
async fn test_wrong_shape_reports_invalid_payload() {
    let (status, body) = send(post_raw("/api/users", Some("application/json"), "[1, 2, 3]")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid JSON payload"));
}

#[tokio::test]
async fn test_null_body_reports_single_general_error() {
    let (status, body) = send(post_raw("/api/users", Some("application/json"), "null")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation failed"));

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], json!("Request object must not be null"));
    assert_eq!(errors[0]["category"], json!("GENERAL"));
}

#[tokio::test]
async fn test_validation_failure_lists_every_error() {
    let payload = json!({"name": "", "email": "bad-email"});
    let (status, body) = send(post_json("/api/users", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Validation failed"));
    assert_eq!(body["metadata"]["type"], json!("VALIDATION_ERROR"));

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], json!("name"));
    assert_eq!(errors[0]["code"], json!("NOT_BLANK"));
    assert_eq!(errors[0]["rejectedValue"], json!(""));
    assert_eq!(errors[1]["field"], json!("email"));
    assert_eq!(errors[1]["code"], json!("PATTERN"));
}

// =============================================================================
// User Endpoints
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_201() {
    let payload = json!({"name": "Ana García", "email": "ana@example.com"});
    let (status, body) = send(post_json("/api/users", &payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("User created successfully"));
    assert_eq!(body["data"]["name"], json!("Ana García"));
    assert_eq!(body["data"]["email"], json!("ana@example.com"));
}

#[tokio::test]
async fn test_list_users_carries_metadata() {
    let (status, body) = send(get("/api/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Users retrieved successfully"));
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["metadata"]["type"], json!("USER_LIST"));
    assert_eq!(body["metadata"]["totalElements"], json!(2));
    assert!(body["metadata"]["executionTimeMs"].is_u64());
}

#[tokio::test]
async fn test_get_user_by_id() {
    let (status, body) = send(get("/api/users/7")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User found"));
    assert_eq!(body["data"]["id"], json!(7));
}

#[tokio::test]
async fn test_get_missing_user_returns_404_without_errors() {
    let (status, body) = send(get("/api/users/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("User not found"));
    // A not-found is a plain message, never an error list.
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let (status, body) = send(get("/api/users/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("The 'id' parameter must be a valid number")
    );
}

#[tokio::test]
async fn test_zero_id_is_rejected() {
    let (status, body) = send(get("/api/products/0")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("The 'id' parameter must be a positive number")
    );
}

#[tokio::test]
async fn test_negative_id_is_rejected() {
    let (status, body) = send(delete("/api/users/-5")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("The 'id' parameter must be a positive number")
    );
}

#[tokio::test]
async fn test_update_user_success() {
    let payload = json!({"id": 7, "name": "Nuevo Nombre"});
    let (status, body) = send(put_json("/api/users/7", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User updated successfully"));
    assert_eq!(body["data"]["name"], json!("Nuevo Nombre"));
}

#[tokio::test]
async fn test_update_user_rejects_mismatched_ids() {
    let payload = json!({"id": 8, "name": "Nuevo Nombre"});
    let (status, body) = send(put_json("/api/users/7", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Path ID and body ID must match"));
}

#[tokio::test]
async fn test_update_user_validates_body_id() {
    let payload = json!({"id": 0, "name": "Ana"});
    let (status, body) = send(put_json("/api/users/7", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation failed"));

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], json!("id"));
    assert_eq!(errors[0]["code"], json!("POSITIVE"));
}

#[tokio::test]
async fn test_delete_user_success() {
    let (status, body) = send(delete("/api/users/7")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("User deleted successfully"));
    assert!(body.get("data").is_none());
}

// =============================================================================
// Product Endpoints
// =============================================================================

#[tokio::test]
async fn test_create_product_returns_201() {
    let payload = json!({
        "name": "Laptop",
        "price": 999.99,
        "description": "14-inch ultrabook"
    });
    let (status, body) = send(post_json("/api/products", &payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Product created successfully"));
    assert_eq!(body["data"]["name"], json!("Laptop"));
    // Prices serialize as plain JSON numbers.
    assert_eq!(body["data"]["price"].as_f64(), Some(999.99));
}

#[tokio::test]
async fn test_create_product_validation_reports_price_bounds() {
    let payload = json!({"name": "Laptop", "price": 0.00});
    let (status, body) = send(post_json("/api/products", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], json!("price"));
    assert_eq!(errors[0]["code"], json!("DECIMAL_MIN"));
    assert_eq!(errors[0]["message"], json!("price must be greater than 0"));
}

#[tokio::test]
async fn test_list_products_carries_metadata() {
    let (status, body) = send(get("/api/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["type"], json!("PRODUCT_LIST"));
    assert_eq!(body["metadata"]["totalElements"], json!(2));
}

#[tokio::test]
async fn test_get_product_by_id() {
    let (status, body) = send(get("/api/products/3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Product found"));
    assert_eq!(body["data"]["id"], json!(3));
    assert_eq!(body["data"]["price"].as_f64(), Some(999.99));
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let (status, body) = send(get("/api/products/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Product not found"));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_update_product_success() {
    let body = json!({"id": 3, "price": 1299.99});
    let (status, response) = send(put_json("/api/products/3", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], json!("Product updated successfully"));
    assert_eq!(response["data"]["price"].as_f64(), Some(1299.99));
}

#[tokio::test]
async fn test_delete_product_returns_confirmation() {
    let (status, body) = send(delete("/api/products/5")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Product deleted successfully"));
    assert_eq!(body["data"]["id"], json!(5));
    assert!(body["data"]["deletedAt"].is_string());
}

// =============================================================================
// Query Parameters
// =============================================================================

#[tokio::test]
async fn test_search_products_by_name() {
    let (status, body) = send(get("/api/products/search?name=Lap")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Found 1 products matching 'Lap'"));
    assert_eq!(body["metadata"]["type"], json!("PRODUCT_SEARCH"));
    assert_eq!(body["metadata"]["totalElements"], json!(1));
}

#[tokio::test]
async fn test_search_without_name_is_rejected() {
    let (status, body) = send(get("/api/products/search")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("The 'name' query parameter is required"));
}

#[tokio::test]
async fn test_search_with_blank_name_is_rejected() {
    let (status, body) = send(get("/api/products/search?name=%20%20")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("The 'name' query parameter is required"));
}

#[tokio::test]
async fn test_price_range_query() {
    let (status, body) = send(get("/api/products/price-range?min=100&max=2000")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Found 2 products between"));
    assert_eq!(body["metadata"]["type"], json!("PRODUCT_PRICE_RANGE"));
}

#[tokio::test]
async fn test_price_range_requires_both_bounds() {
    let (status, body) = send(get("/api/products/price-range?min=100")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("The 'min' and 'max' query parameters are required")
    );
}

#[tokio::test]
async fn test_price_range_rejects_non_numeric_bounds() {
    let (status, body) = send(get("/api/products/price-range?min=abc&max=2000")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("The 'min' and 'max' query parameters must be valid numbers")
    );
}

#[tokio::test]
async fn test_price_range_rejects_inverted_bounds() {
    let (status, body) = send(get("/api/products/price-range?min=2000&max=100")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Minimum price must not exceed maximum price")
    );
}

// =============================================================================
// Storage Fault Classification
// =============================================================================

#[tokio::test]
async fn test_duplicate_email_maps_to_conflict() {
    let payload = json!({"name": "Ana", "email": "dup@example.com"});
    let (status, body) = send(post_json("/api/users", &payload)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("A record with that email already exists")
    );
}

#[tokio::test]
async fn test_unclassified_fault_maps_to_500_without_detail() {
    let (status, body) = send(get("/api/products/500")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], json!("An internal error occurred"));
    // Production mode never leaks the fault text.
    assert!(body.get("errors").is_none());
}

// =============================================================================
// Response Envelope
// =============================================================================

#[tokio::test]
async fn test_success_envelope_shape() {
    let response = ApiResponse::success(vec!["a", "b"], "ok");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["message"], json!("ok"));
    assert_eq!(value["data"], json!(["a", "b"]));
    assert!(value["timestamp"].is_i64());
    assert!(value.get("errors").is_none());
    assert!(value.get("metadata").is_none());
}

#[tokio::test]
async fn test_error_envelope_shape() {
    let response = ApiResponse::error_with_details(
        "Validation failed",
        vec![ErrorDetail::field(
            "name",
            "NOT_BLANK",
            "name must not be blank",
            Some(json!("")),
        )],
    );
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(false));
    assert!(value.get("data").is_none());
    assert_eq!(value["errors"][0]["rejectedValue"], json!(""));
    assert_eq!(value["errors"][0]["category"], json!("FIELD"));
    assert!(value["errors"][0].get("rejected_value").is_none());
}

#[tokio::test]
async fn test_metadata_serializes_type_tag() {
    let metadata = ResponseMetadata::with_total("PRODUCT_SEARCH", 3);
    let value = serde_json::to_value(&metadata).unwrap();

    assert_eq!(value["type"], json!("PRODUCT_SEARCH"));
    assert_eq!(value["totalElements"], json!(3));
    assert!(value.get("kind").is_none());
    assert!(value.get("executionTimeMs").is_none());
}

#[tokio::test]
async fn test_envelope_round_trip() {
    let original = ApiResponse::success(vec!["a".to_string(), "b".to_string()], "ok");
    let encoded = serde_json::to_string(&original).unwrap();
    let decoded: ApiResponse<Vec<String>> = serde_json::from_str(&encoded).unwrap();

    assert!(decoded.success);
    assert_eq!(decoded.data, original.data);
    assert_eq!(decoded.message, original.message);
    assert_eq!(decoded.timestamp, original.timestamp);
}
