//! Cascading delete tests across Users, Projects and Tasks.

use crate::db::{
    Database, DbError, ProjectRepository, SqliteDatabase, TaskRepository, UserRepository,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

async fn exec(db: &SqliteDatabase, sql: &str) {
    sqlx::query(sql)
        .execute(db.pool())
        .await
        .expect("Seed statement should succeed");
}

async fn count(db: &SqliteDatabase, sql: &str) -> i64 {
    sqlx::query_scalar(sql)
        .fetch_one(db.pool())
        .await
        .expect("Count query should succeed")
}

/// User 1 owns Project 10 (Tasks 100, 101) and Project 11 (Task 110).
/// User 2 owns Project 20 (Task 200).
async fn seed(db: &SqliteDatabase) {
    exec(
        db,
        "INSERT INTO Users (id, name, created_at) VALUES
            (1, 'Ada', '2025-01-01 00:00:00'),
            (2, 'Grace', '2025-01-01 00:00:00')",
    )
    .await;
    exec(
        db,
        "INSERT INTO Projects (id, userID, title, created_at, updated_at) VALUES
            (10, 1, 'Engine', '2025-01-01 00:00:00', '2025-01-01 00:00:00'),
            (11, 1, 'Notes', '2025-01-01 00:00:00', '2025-01-01 00:00:00'),
            (20, 2, 'Cobol', '2025-01-01 00:00:00', '2025-01-01 00:00:00')",
    )
    .await;
    exec(
        db,
        "INSERT INTO Tasks (id, project_id, title, created_at, updated_at) VALUES
            (100, 10, 'Parser', '2025-01-01 00:00:00', '2025-01-01 00:00:00'),
            (101, 10, 'Codegen', '2025-01-01 00:00:00', '2025-01-01 00:00:00'),
            (110, 11, 'Draft', '2025-01-01 00:00:00', '2025-01-01 00:00:00'),
            (200, 20, 'Payroll', '2025-01-01 00:00:00', '2025-01-01 00:00:00')",
    )
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_user_removes_projects_and_tasks() {
    let db = setup_db().await;
    seed(&db).await;

    db.users().delete(1).await.expect("Delete should succeed");

    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM Tasks WHERE id IN (100, 101, 110)").await,
        0
    );
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM Projects WHERE id IN (10, 11)").await,
        0
    );
    assert_eq!(count(&db, "SELECT COUNT(*) FROM Users WHERE id = 1").await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_user_leaves_other_users_untouched() {
    let db = setup_db().await;
    seed(&db).await;

    db.users().delete(1).await.expect("Delete should succeed");

    assert!(db.users().get(2).await.is_ok());
    assert!(db.projects().get(20).await.is_ok());
    assert!(db.tasks().get(200).await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_nonexistent_user_fails_without_side_effects() {
    let db = setup_db().await;
    seed(&db).await;

    let err = db.users().delete(999).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    assert_eq!(count(&db, "SELECT COUNT(*) FROM Users").await, 2);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM Projects").await, 3);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM Tasks").await, 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_project_removes_only_its_tasks() {
    let db = setup_db().await;
    seed(&db).await;

    db.projects()
        .delete(10)
        .await
        .expect("Delete should succeed");

    assert!(db.projects().get(10).await.unwrap_err().is_not_found());
    assert!(db.tasks().get(100).await.unwrap_err().is_not_found());
    assert!(db.tasks().get(101).await.unwrap_err().is_not_found());

    // Sibling project of the same user keeps its task
    assert!(db.projects().get(11).await.is_ok());
    assert!(db.tasks().get(110).await.is_ok());
    assert!(db.users().get(1).await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_nonexistent_project_returns_not_found() {
    let db = setup_db().await;
    seed(&db).await;

    let err = db.projects().delete(999).await.unwrap_err();
    match err {
        DbError::NotFound { entity_type, id } => {
            assert_eq!(entity_type, "Project");
            assert_eq!(id, "999");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }

    assert_eq!(count(&db, "SELECT COUNT(*) FROM Tasks").await, 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_task_does_not_cascade() {
    let db = setup_db().await;
    seed(&db).await;

    db.tasks().delete(100).await.expect("Delete should succeed");

    assert!(db.tasks().get(100).await.unwrap_err().is_not_found());
    assert!(db.tasks().get(101).await.is_ok());
    assert!(db.projects().get(10).await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_parent_delete_rolls_back_children() {
    let db = setup_db().await;
    seed(&db).await;

    // Make the final statement of the cascade fail after the children are gone
    exec(
        &db,
        "CREATE TRIGGER block_user_delete BEFORE DELETE ON Users
         BEGIN SELECT RAISE(ABORT, 'user deletion blocked'); END",
    )
    .await;

    let err = db.users().delete(1).await.unwrap_err();
    assert!(matches!(err, DbError::Database { .. }));

    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM Tasks WHERE id IN (100, 101, 110)").await,
        3
    );
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM Projects WHERE id IN (10, 11)").await,
        2
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_project_delete_rolls_back_tasks() {
    let db = setup_db().await;
    seed(&db).await;

    exec(
        &db,
        "CREATE TRIGGER block_project_delete BEFORE DELETE ON Projects
         BEGIN SELECT RAISE(ABORT, 'project deletion blocked'); END",
    )
    .await;

    let err = db.projects().delete(10).await.unwrap_err();
    assert!(matches!(err, DbError::Database { .. }));

    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM Tasks WHERE project_id = 10").await,
        2
    );
}
