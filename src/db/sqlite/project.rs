//! SQLite ProjectRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::helpers::{db_err, row_to_project};
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Id, Project, ProjectFields, ProjectRepository};

const INSERT_PROJECT_FOR_USER: &str = "INSERT INTO Projects (userID, title, description, created_at, updated_at)
     SELECT ?, ?, ?, ?, ? WHERE EXISTS (SELECT 1 FROM Users WHERE id = ?)";
const DELETE_PROJECT_TASKS: &str = "DELETE FROM Tasks WHERE project_id = ?";
const DELETE_PROJECT: &str = "DELETE FROM Projects WHERE id = ?";

/// SQLx-backed project repository.
pub struct SqliteProjectRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ProjectRepository for SqliteProjectRepository<'a> {
    /// The owner check and the insert are one statement, so the write lock
    /// is taken up front and a missing user reads as NotFound rather than a
    /// foreign key failure.
    async fn create(&self, user_id: Id, fields: &ProjectFields) -> DbResult<Project> {
        let created_at = current_timestamp();
        let updated_at = created_at.clone();

        let result = sqlx::query(INSERT_PROJECT_FOR_USER)
            .bind(user_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&created_at)
            .bind(&updated_at)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", user_id));
        }

        Ok(Project {
            id: result.last_insert_rowid(),
            user_id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            created_at,
            updated_at,
        })
    }

    async fn get(&self, id: Id) -> DbResult<Project> {
        let row = sqlx::query(
            "SELECT id, userID, title, description, created_at, updated_at FROM Projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref()
            .map(row_to_project)
            .ok_or_else(|| DbError::not_found("Project", id))
    }

    async fn find_by_user(&self, user_id: Id) -> DbResult<Vec<Project>> {
        let rows = sqlx::query(
            "SELECT id, userID, title, description, created_at, updated_at
             FROM Projects WHERE userID = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.iter().map(row_to_project).collect())
    }

    async fn update(&self, id: Id, fields: &ProjectFields) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE Projects SET title = ?, description = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(current_timestamp())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Project", id));
        }

        Ok(())
    }

    /// Removes the project's tasks, then the project, in one transaction.
    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> DbResult<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let tasks = sqlx::query(DELETE_PROJECT_TASKS)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        let projects = sqlx::query(DELETE_PROJECT)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        if projects == 0 {
            return Err(DbError::not_found("Project", id));
        }

        tx.commit().await.map_err(db_err)?;

        debug!(tasks, "Deleted project and its tasks");
        Ok(())
    }
}
