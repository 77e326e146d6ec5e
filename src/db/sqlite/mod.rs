//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod helpers;
mod project;
mod task;
mod user;

#[cfg(test)]
mod cascade_test;

pub use connection::SqliteDatabase;
pub use project::SqliteProjectRepository;
pub use task::SqliteTaskRepository;
pub use user::SqliteUserRepository;
