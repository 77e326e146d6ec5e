//! SQLite UserRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::helpers::{db_err, row_to_user};
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Id, NewUser, User, UserRepository};

const DELETE_USER_TASKS: &str =
    "DELETE FROM Tasks WHERE project_id IN (SELECT id FROM Projects WHERE userID = ?)";
const DELETE_USER_PROJECTS: &str = "DELETE FROM Projects WHERE userID = ?";
const DELETE_USER: &str = "DELETE FROM Users WHERE id = ?";

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn create(&self, user: &NewUser) -> DbResult<User> {
        let created_at = current_timestamp();

        let result = sqlx::query("INSERT INTO Users (name, email, created_at) VALUES (?, ?, ?)")
            .bind(&user.name)
            .bind(&user.email)
            .bind(&created_at)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at,
        })
    }

    async fn get(&self, id: Id) -> DbResult<User> {
        let row = sqlx::query("SELECT id, name, email, created_at FROM Users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref()
            .map(row_to_user)
            .ok_or_else(|| DbError::not_found("User", id))
    }

    async fn list(&self) -> DbResult<Vec<User>> {
        let rows = sqlx::query("SELECT id, name, email, created_at FROM Users ORDER BY id")
            .fetch_all(self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.iter().map(row_to_user).collect())
    }

    /// Tasks of the user's projects go first, then the projects, then the
    /// user row. All three statements share one transaction; if the user row
    /// is missing the (empty) child deletes are rolled back with it.
    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> DbResult<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let tasks = sqlx::query(DELETE_USER_TASKS)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        let projects = sqlx::query(DELETE_USER_PROJECTS)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        let users = sqlx::query(DELETE_USER)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        if users == 0 {
            return Err(DbError::not_found("User", id));
        }

        tx.commit().await.map_err(db_err)?;

        debug!(tasks, projects, "Deleted user and owned rows");
        Ok(())
    }
}
