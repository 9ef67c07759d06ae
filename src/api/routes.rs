//! Application route configuration.

use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{product_routes, user_routes};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::API_VERSION;
use crate::types::ApiResponse;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/users", user_routes())
        .nest("/api/products", product_routes())
        .fallback(route_not_found)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Welcome document returned at the root path
#[derive(Serialize)]
struct WelcomeInfo {
    message: &'static str,
    version: &'static str,
    endpoints: Vec<&'static str>,
}

/// Service health payload
#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Root endpoint with an index of the available routes
async fn welcome() -> Json<ApiResponse<WelcomeInfo>> {
    let info = WelcomeInfo {
        message: "Storefront REST API",
        version: API_VERSION,
        endpoints: vec![
            "GET  /api/health",
            "GET  /api/users",
            "POST /api/users",
            "GET  /api/users/:id",
            "PUT  /api/users/:id",
            "DELETE /api/users/:id",
            "GET  /api/products",
            "POST /api/products",
            "GET  /api/products/:id",
            "PUT  /api/products/:id",
            "DELETE /api/products/:id",
            "GET  /api/products/search?name=...",
            "GET  /api/products/price-range?min=...&max=...",
            "GET  /api/products/health",
        ],
    };

    Json(ApiResponse::success(info, "Welcome to the Storefront API"))
}

/// Health check endpoint
async fn health() -> Json<ApiResponse<HealthStatus>> {
    let health = HealthStatus {
        status: "UP",
        service: "UserService",
        version: API_VERSION,
    };

    Json(ApiResponse::success(health, "Service is running"))
}

/// Envelope-shaped 404 for unknown routes
async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Route not found")),
    )
}
