//! Task use cases.

use tracing::info;

use super::validation::{optional_text, require_id, require_text};
use crate::db::{DbResult, Id, Task, TaskFields, TaskRepository};

fn validate(fields: TaskFields) -> DbResult<TaskFields> {
    Ok(TaskFields {
        title: require_text("title", &fields.title)?,
        description: optional_text(fields.description),
        status: fields.status,
    })
}

/// Add a task to a project.
pub struct CreateTask<R> {
    repo: R,
}

impl<R: TaskRepository + Sync> CreateTask<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, project_id: Id, fields: TaskFields) -> DbResult<Task> {
        require_id("Project", project_id)?;
        let fields = validate(fields)?;
        let task = self.repo.create(project_id, &fields).await?;
        info!(task_id = task.id, project_id, "Created task");
        Ok(task)
    }
}

/// List the tasks of a project.
pub struct GetTasksByProject<R> {
    repo: R,
}

impl<R: TaskRepository + Sync> GetTasksByProject<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, project_id: Id) -> DbResult<Vec<Task>> {
        require_id("Project", project_id)?;
        self.repo.find_by_project(project_id).await
    }
}

/// Replace a task's title, description and status.
pub struct UpdateTask<R> {
    repo: R,
}

impl<R: TaskRepository + Sync> UpdateTask<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Id, fields: TaskFields) -> DbResult<()> {
        require_id("Task", id)?;
        let fields = validate(fields)?;
        self.repo.update(id, &fields).await
    }
}

/// Remove a single task.
pub struct DeleteTask<R> {
    repo: R,
}

impl<R: TaskRepository + Sync> DeleteTask<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Id) -> DbResult<()> {
        require_id("Task", id)?;
        self.repo.delete(id).await?;
        info!(task_id = id, "Deleted task");
        Ok(())
    }
}
