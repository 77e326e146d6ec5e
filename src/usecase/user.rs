//! User use cases.

use tracing::info;

use super::validation::{optional_email, require_id, require_text};
use crate::db::{DbResult, Id, NewUser, User, UserRepository};

/// Register a new user.
pub struct CreateUser<R> {
    repo: R,
}

impl<R: UserRepository + Sync> CreateUser<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: NewUser) -> DbResult<User> {
        let user = NewUser {
            name: require_text("name", &input.name)?,
            email: optional_email(input.email)?,
        };
        let created = self.repo.create(&user).await?;
        info!(user_id = created.id, "Created user");
        Ok(created)
    }
}

/// Fetch a single user.
pub struct GetUser<R> {
    repo: R,
}

impl<R: UserRepository + Sync> GetUser<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Id) -> DbResult<User> {
        require_id("User", id)?;
        self.repo.get(id).await
    }
}

/// List every user.
pub struct ListUsers<R> {
    repo: R,
}

impl<R: UserRepository + Sync> ListUsers<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> DbResult<Vec<User>> {
        self.repo.list().await
    }
}

/// Remove a user together with every project and task they own.
pub struct DeleteUser<R> {
    repo: R,
}

impl<R: UserRepository + Sync> DeleteUser<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Id) -> DbResult<()> {
        require_id("User", id)?;
        self.repo.delete(id).await?;
        info!(user_id = id, "Deleted user");
        Ok(())
    }
}
