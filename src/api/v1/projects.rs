//! Project management handlers.

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
use crate::db::{Database, Id, Project, ProjectFields};
use crate::usecase::{CreateProject, DeleteProject, GetProjectsByUser, UpdateProject};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Project response DTO
#[derive(Serialize, ToSchema)]
pub struct ProjectResponse {
    /// Unique identifier
    #[schema(example = 10)]
    pub id: Id,
    /// Owning user
    #[schema(example = 1)]
    pub user_id: Id,
    /// Project title
    #[schema(example = "My Project")]
    pub title: String,
    /// Optional description
    #[schema(example = "A description of the project")]
    pub description: Option<String>,
    /// Creation timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
    /// Last update timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub updated_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            title: p.title,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Create project request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    /// Project title
    #[schema(example = "My Project")]
    pub title: String,
    /// Optional description
    #[schema(example = "A description of the project")]
    pub description: Option<String>,
}

/// Update project request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    /// Project title
    #[schema(example = "Updated Project")]
    pub title: String,
    /// Optional description
    #[schema(example = "Updated description")]
    pub description: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a project for a user
#[utoipa::path(
    post,
    path = "/api/users/{id}/projects",
    tag = "projects",
    params(
        ("id" = i64, Path, description = "Owning user ID")
    ),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_project<D: Database>(
    State(state): State<AppState<D>>,
    user_id: Result<Path<Id>, PathRejection>,
    body: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let user_id = path_id(user_id)?;
    let req = json_body(body)?;

    let project = CreateProject::new(state.db().projects())
        .execute(
            user_id,
            ProjectFields {
                title: req.title,
                description: req.description,
            },
        )
        .await
        .map_err(map_db_error)?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

/// List a user's projects
///
/// A user without projects, or an unknown user, yields an empty list.
#[utoipa::path(
    get,
    path = "/api/users/{id}/projects",
    tag = "projects",
    params(
        ("id" = i64, Path, description = "Owning user ID")
    ),
    responses(
        (status = 200, description = "Projects owned by the user", body = Vec<ProjectResponse>),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_user_projects<D: Database>(
    State(state): State<AppState<D>>,
    user_id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let user_id = path_id(user_id)?;

    let projects = GetProjectsByUser::new(state.db().projects())
        .execute(user_id)
        .await
        .map_err(map_db_error)?;

    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "projects",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 204, description = "Project updated"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_project<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
    body: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;
    let req = json_body(body)?;

    UpdateProject::new(state.db().projects())
        .execute(
            id,
            ProjectFields {
                title: req.title,
                description: req.description,
            },
        )
        .await
        .map_err(map_db_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a project
///
/// Deletes the project and all of its tasks
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "projects",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 400, description = "Invalid project ID", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_project<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;

    DeleteProject::new(state.db().projects())
        .execute(id)
        .await
        .map_err(map_db_error)?;

    Ok(StatusCode::NO_CONTENT)
}
