//! Integration tests for Task API endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

async fn test_app() -> Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    routes::create_router(AppState::new(db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Seed a user and project, returning the project ID
async fn seed_project(app: &Router) -> i64 {
    let response = send(app, "POST", "/api/users", Some(json!({"name": "Ada"}))).await;
    let user_id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(
        app,
        "POST",
        &format!("/api/users/{}/projects", user_id),
        Some(json!({"title": "Engine"})),
    )
    .await;
    json_body(response).await["id"].as_i64().unwrap()
}

async fn list_tasks(app: &Router, project_id: i64) -> Value {
    let response = send(app, "GET", &format!("/api/projects/{}/tasks", project_id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_defaults_to_todo() {
    let app = test_app().await;
    let project_id = seed_project(&app).await;

    let response = send(
        &app,
        "POST",
        &format!("/api/projects/{}/tasks", project_id),
        Some(json!({"title": "Write the parser"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["project_id"], project_id);
    assert_eq!(body["title"], "Write the parser");
    assert_eq!(body["status"], "todo");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_with_explicit_status() {
    let app = test_app().await;
    let project_id = seed_project(&app).await;

    let response = send(
        &app,
        "POST",
        &format!("/api/projects/{}/tasks", project_id),
        Some(json!({"title": "Review", "status": "in_progress"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["status"], "in_progress");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_with_invalid_status_is_bad_request() {
    let app = test_app().await;
    let project_id = seed_project(&app).await;

    let response = send(
        &app,
        "POST",
        &format!("/api/projects/{}/tasks", project_id),
        Some(json!({"title": "Review", "status": "blocked"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(list_tasks(&app, project_id).await, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_for_missing_project_is_not_found() {
    let app = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/projects/404/tasks",
        Some(json!({"title": "Orphan"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "Project '404' not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_only_returns_project_tasks() {
    let app = test_app().await;
    let first = seed_project(&app).await;
    let second = seed_project(&app).await;

    for (project_id, title) in [(first, "A"), (second, "B"), (first, "C")] {
        let response = send(
            &app,
            "POST",
            &format!("/api/projects/{}/tasks", project_id),
            Some(json!({"title": title})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let tasks = list_tasks(&app, first).await;
    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_task_changes_status() {
    let app = test_app().await;
    let project_id = seed_project(&app).await;

    let response = send(
        &app,
        "POST",
        &format!("/api/projects/{}/tasks", project_id),
        Some(json!({"title": "Draft"})),
    )
    .await;
    let task_id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/tasks/{}", task_id),
        Some(json!({"title": "Final", "description": "Ship it", "status": "done"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let tasks = list_tasks(&app, project_id).await;
    assert_eq!(tasks[0]["title"], "Final");
    assert_eq!(tasks[0]["description"], "Ship it");
    assert_eq!(tasks[0]["status"], "done");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_missing_task_is_not_found() {
    let app = test_app().await;

    let response = send(
        &app,
        "PUT",
        "/api/tasks/999",
        Some(json!({"title": "Ghost"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_task_returns_no_content_then_not_found() {
    let app = test_app().await;
    let project_id = seed_project(&app).await;

    let response = send(
        &app,
        "POST",
        &format!("/api/projects/{}/tasks", project_id),
        Some(json!({"title": "Once"})),
    )
    .await;
    let task_id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(&app, "DELETE", &format!("/api/tasks/{}", task_id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", &format!("/api/tasks/{}", task_id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await["error"],
        format!("Task '{}' not found", task_id)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn task_routes_reject_non_integer_ids() {
    let app = test_app().await;

    let response = send(&app, "GET", "/api/projects/abc/tasks", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "DELETE", "/api/tasks/1.5", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
