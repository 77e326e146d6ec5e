//! Shared helper functions for SQLite repositories.

use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::{DbError, Project, Task, TaskStatus, User};

/// Wrap a driver error as a storage failure.
pub fn db_err(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

/// Convert a database row to a User model.
pub fn row_to_user(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        created_at: row.get("created_at"),
    }
}

/// Convert a database row to a Project model.
pub fn row_to_project(row: &SqliteRow) -> Project {
    Project {
        id: row.get("id"),
        user_id: row.get("userID"),
        title: row.get("title"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Convert a database row to a Task model.
pub fn row_to_task(row: &SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        project_id: row.get("project_id"),
        title: row.get("title"),
        description: row.get("description"),
        status: {
            let status_str: String = row.get("status");
            TaskStatus::from_str(&status_str).unwrap_or_default()
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
