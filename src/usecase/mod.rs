//! Application use cases.
//!
//! One type per CRUD action. Each validates its input, then makes a single
//! repository call. Use cases are generic over the repository traits so the
//! HTTP layer never touches SQL directly.

mod project;
mod task;
mod user;
mod validation;


pub use project::{CreateProject, DeleteProject, GetProjectsByUser, UpdateProject};
pub use task::{CreateTask, DeleteTask, GetTasksByProject, UpdateTask};
pub use user::{CreateUser, DeleteUser, GetUser, ListUsers};
