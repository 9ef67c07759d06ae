//! User handlers.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};

use crate::api::extractors::{ValidatedId, ValidatedJson};
use crate::api::AppState;
use crate::config::META_USER_LIST;
use crate::domain::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, ResponseMetadata};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "A user with that email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state
        .user_service
        .create_user(payload.name, payload.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UserResponse::from(user),
            "User created successfully",
        )),
    ))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let started = Instant::now();
    let users = state.user_service.list_users().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    let metadata = ResponseMetadata::with_execution_time(
        META_USER_LIST,
        users.len() as u64,
        started.elapsed().as_millis() as u64,
    );

    Ok(Json(ApiResponse::success_with_metadata(
        users,
        "Users retrieved successfully",
        metadata,
    )))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid ID parameter"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::success(
        UserResponse::from(user),
        "User found",
    )))
}

/// Update user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    if let Some(body_id) = payload.id {
        if body_id != id {
            return Err(AppError::bad_request("Path ID and body ID must match"));
        }
    }

    let user = state
        .user_service
        .update_user(id, payload.name, payload.email)
        .await?;

    Ok(Json(ApiResponse::success(
        UserResponse::from(user),
        "User updated successfully",
    )))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 400, description = "Invalid ID parameter"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> AppResult<Json<ApiResponse<()>>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(ApiResponse::ok("User deleted successfully")))
}
