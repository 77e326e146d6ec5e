//! Project use cases.

use tracing::info;

use super::validation::{optional_text, require_id, require_text};
use crate::db::{DbResult, Id, Project, ProjectFields, ProjectRepository};

fn validate(fields: ProjectFields) -> DbResult<ProjectFields> {
    Ok(ProjectFields {
        title: require_text("title", &fields.title)?,
        description: optional_text(fields.description),
    })
}

/// Create a project for a user.
pub struct CreateProject<R> {
    repo: R,
}

impl<R: ProjectRepository + Sync> CreateProject<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: Id, fields: ProjectFields) -> DbResult<Project> {
        require_id("User", user_id)?;
        let fields = validate(fields)?;
        let project = self.repo.create(user_id, &fields).await?;
        info!(project_id = project.id, user_id, "Created project");
        Ok(project)
    }
}

/// List the projects a user owns.
///
/// An unknown user simply has no projects.
pub struct GetProjectsByUser<R> {
    repo: R,
}

impl<R: ProjectRepository + Sync> GetProjectsByUser<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: Id) -> DbResult<Vec<Project>> {
        require_id("User", user_id)?;
        self.repo.find_by_user(user_id).await
    }
}

/// Replace a project's title and description.
pub struct UpdateProject<R> {
    repo: R,
}

impl<R: ProjectRepository + Sync> UpdateProject<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Id, fields: ProjectFields) -> DbResult<()> {
        require_id("Project", id)?;
        let fields = validate(fields)?;
        self.repo.update(id, &fields).await
    }
}

/// Remove a project and its tasks.
pub struct DeleteProject<R> {
    repo: R,
}

impl<R: ProjectRepository + Sync> DeleteProject<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Id) -> DbResult<()> {
        require_id("Project", id)?;
        self.repo.delete(id).await?;
        info!(project_id = id, "Deleted project");
        Ok(())
    }
}
