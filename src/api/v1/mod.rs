//! V1 API handlers.

mod projects;
mod system;
mod tasks;
mod users;

#[cfg(test)]
mod tasks_test;

pub use projects::*;
pub use system::*;
pub use tasks::*;
pub use users::*;

use axum::{
    Json,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::db::{DbError, Id};

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Project '42' not found")]
    pub error: String,
}

/// Handler result: a success value or a status code with an error body.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

fn error_response(status: StatusCode, error: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error }))
}

/// Map a storage or validation error to its HTTP status.
pub(crate) fn map_db_error(e: DbError) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        DbError::NotFound { entity_type, id } => error_response(
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity_type, id),
        ),
        DbError::Validation { message } => error_response(StatusCode::BAD_REQUEST, message),
        other => {
            warn!(error = %other, "Request failed with storage error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// Unwrap an integer path parameter; anything unparsable is a 400.
pub(crate) fn path_id(path: Result<Path<Id>, PathRejection>) -> ApiResult<Id> {
    path.map(|Path(id)| id)
        .map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text()))
}

/// Unwrap a JSON body; a missing content type or malformed payload is a 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text()))
}
