//! SQLite TaskRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::helpers::{db_err, row_to_task};
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Id, Task, TaskFields, TaskRepository};

const INSERT_TASK_FOR_PROJECT: &str = "INSERT INTO Tasks (project_id, title, description, status, created_at, updated_at)
     SELECT ?, ?, ?, ?, ?, ? WHERE EXISTS (SELECT 1 FROM Projects WHERE id = ?)";

/// SQLx-backed task repository.
pub struct SqliteTaskRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> TaskRepository for SqliteTaskRepository<'a> {
    async fn create(&self, project_id: Id, fields: &TaskFields) -> DbResult<Task> {
        let created_at = current_timestamp();
        let updated_at = created_at.clone();

        let result = sqlx::query(INSERT_TASK_FOR_PROJECT)
            .bind(project_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.status.to_string())
            .bind(&created_at)
            .bind(&updated_at)
            .bind(project_id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Project", project_id));
        }

        Ok(Task {
            id: result.last_insert_rowid(),
            project_id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            status: fields.status,
            created_at,
            updated_at,
        })
    }

    async fn get(&self, id: Id) -> DbResult<Task> {
        let row = sqlx::query(
            "SELECT id, project_id, title, description, status, created_at, updated_at
             FROM Tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref()
            .map(row_to_task)
            .ok_or_else(|| DbError::not_found("Task", id))
    }

    async fn find_by_project(&self, project_id: Id) -> DbResult<Vec<Task>> {
        let rows = sqlx::query(
            "SELECT id, project_id, title, description, status, created_at, updated_at
             FROM Tasks WHERE project_id = ? ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.iter().map(row_to_task).collect())
    }

    async fn update(&self, id: Id, fields: &TaskFields) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE Tasks
            SET title = ?, description = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.status.to_string())
        .bind(current_timestamp())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Task", id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM Tasks WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Task", id));
        }

        debug!("Deleted task");
        Ok(())
    }
}
