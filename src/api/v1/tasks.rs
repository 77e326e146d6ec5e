//! Task management handlers.

use std::str::FromStr;

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
use crate::db::{Database, DbError, Id, Task, TaskFields, TaskStatus};
use crate::usecase::{CreateTask, DeleteTask, GetTasksByProject, UpdateTask};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct TaskResponse {
    #[schema(example = 100)]
    pub id: Id,
    #[schema(example = 10)]
    pub project_id: Id,
    #[schema(example = "Write the parser")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "in_progress")]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            project_id: t.project_id,
            title: t.title,
            description: t.description,
            status: t.status.to_string(),
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Task request DTO, shared by create and update.
///
/// `status` is one of `todo`, `in_progress`, `done` and defaults to `todo`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskRequest {
    #[schema(example = "Write the parser")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "todo")]
    pub status: Option<String>,
}

impl TaskRequest {
    fn into_fields(self) -> Result<TaskFields, DbError> {
        let status = match self.status.as_deref() {
            None => TaskStatus::default(),
            Some(s) => TaskStatus::from_str(s).map_err(DbError::validation)?,
        };
        Ok(TaskFields {
            title: self.title,
            description: self.description,
            status,
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a task in a project
#[utoipa::path(
    post,
    path = "/api/projects/{id}/tasks",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Parent project ID")
    ),
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_task<D: Database>(
    State(state): State<AppState<D>>,
    project_id: Result<Path<Id>, PathRejection>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let project_id = path_id(project_id)?;
    let fields = json_body(body)?.into_fields().map_err(map_db_error)?;

    let task = CreateTask::new(state.db().tasks())
        .execute(project_id, fields)
        .await
        .map_err(map_db_error)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// List the tasks of a project
#[utoipa::path(
    get,
    path = "/api/projects/{id}/tasks",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Parent project ID")
    ),
    responses(
        (status = 200, description = "Tasks of the project", body = Vec<TaskResponse>),
        (status = 400, description = "Invalid project ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_project_tasks<D: Database>(
    State(state): State<AppState<D>>,
    project_id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let project_id = path_id(project_id)?;

    let tasks = GetTasksByProject::new(state.db().tasks())
        .execute(project_id)
        .await
        .map_err(map_db_error)?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = TaskRequest,
    responses(
        (status = 204, description = "Task updated"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_task<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;
    let fields = json_body(body)?.into_fields().map_err(map_db_error)?;

    UpdateTask::new(state.db().tasks())
        .execute(id, fields)
        .await
        .map_err(map_db_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_task<D: Database>(
    State(state): State<AppState<D>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;

    DeleteTask::new(state.db().tasks())
        .execute(id)
        .await
        .map_err(map_db_error)?;

    Ok(StatusCode::NO_CONTENT)
}
