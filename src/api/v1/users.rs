//! User management handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{ApiResult, ErrorResponse, json_body, map_db_error, path_id};
use crate::api::AppState;
use crate::db::{Database, Id, NewUser, User};
use crate::usecase::{CreateUser, DeleteUser, GetUser, ListUsers};

// =============================================================================
// DTOs
// =============================================================================

/// User response DTO
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

/// Create user request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_user<D: Database>(
    State(state): State<AppState<D>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let req = json_body(body)?;

    let user = CreateUser::new(state.db().users())
        .execute(NewUser {
            name: req.name,
            email: req.email,
        })
        .await
        .map_err(map_db_error)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_users<D: Database>(
    State(state): State<AppState<D>>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = ListUsers::new(state.db().users())
        .execute()
        .await
        .map_err(map_db_error)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let id = path_id(id)?;

    let user = GetUser::new(state.db().users())
        .execute(id)
        .await
        .map_err(map_db_error)?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user
///
/// Removes the user together with all of their projects and those projects' tasks.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User and owned data deleted"),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_user<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;

    DeleteUser::new(state.db().users())
        .execute(id)
        .await
        .map_err(map_db_error)?;

    Ok(StatusCode::NO_CONTENT)
}
