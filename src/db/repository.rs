//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Every `delete` removes the entity together with everything it owns,
//! children first, and reports `DbError::NotFound` when the target row
//! itself does not exist.

use std::future::Future;

#[cfg(test)]
use mockall::automock;

use crate::db::{
    DbResult,
    models::{Id, NewUser, Project, ProjectFields, Task, TaskFields, User},
};

/// Repository for User operations.
#[cfg_attr(test, automock)]
pub trait UserRepository {
    /// Create a new user.
    fn create(&self, user: &NewUser) -> impl Future<Output = DbResult<User>> + Send;

    /// Get a user by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<User>> + Send;

    /// Get all users.
    fn list(&self) -> impl Future<Output = DbResult<Vec<User>>> + Send;

    /// Delete a user, their projects and the tasks of those projects.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Project operations.
#[cfg_attr(test, automock)]
pub trait ProjectRepository {
    /// Create a project owned by `user_id`.
    fn create(
        &self,
        user_id: Id,
        fields: &ProjectFields,
    ) -> impl Future<Output = DbResult<Project>> + Send;

    /// Get a project by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Project>> + Send;

    /// Get all projects owned by a user (empty when the user has none).
    fn find_by_user(&self, user_id: Id) -> impl Future<Output = DbResult<Vec<Project>>> + Send;

    /// Replace the mutable fields of an existing project.
    fn update(&self, id: Id, fields: &ProjectFields) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a project and its tasks.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Task operations.
#[cfg_attr(test, automock)]
pub trait TaskRepository {
    /// Create a task inside `project_id`.
    fn create(
        &self,
        project_id: Id,
        fields: &TaskFields,
    ) -> impl Future<Output = DbResult<Task>> + Send;

    /// Get a task by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Task>> + Send;

    /// Get all tasks of a project.
    fn find_by_project(&self, project_id: Id) -> impl Future<Output = DbResult<Vec<Task>>> + Send;

    /// Replace the mutable fields of an existing task.
    fn update(&self, id: Id, fields: &TaskFields) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a single task.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Users<'a>: UserRepository + Send + Sync
    where
        Self: 'a;
    type Projects<'a>: ProjectRepository + Send + Sync
    where
        Self: 'a;
    type Tasks<'a>: TaskRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the user repository.
    fn users(&self) -> Self::Users<'_>;

    /// Get the project repository.
    fn projects(&self) -> Self::Projects<'_>;

    /// Get the task repository.
    fn tasks(&self) -> Self::Tasks<'_>;
}
