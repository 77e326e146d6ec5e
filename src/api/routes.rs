//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::v1::{
    self, CreateProjectRequest, CreateUserRequest, ErrorResponse, HealthResponse,
    ProjectResponse, TaskRequest, TaskResponse, UpdateProjectRequest, UserResponse,
};
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "doProject API",
        version = "0.1.0",
        description = "Users, projects and tasks with cascading deletes",
        license(name = "GPL-2.0")
    ),
    paths(
        v1::health,
        v1::create_user,
        v1::list_users,
        v1::get_user,
        v1::delete_user,
        v1::create_project,
        v1::list_user_projects,
        v1::update_project,
        v1::delete_project,
        v1::create_task,
        v1::list_project_tasks,
        v1::update_task,
        v1::delete_task,
    ),
    components(
        schemas(
            HealthResponse,
            UserResponse,
            CreateUserRequest,
            ProjectResponse,
            CreateProjectRequest,
            UpdateProjectRequest,
            TaskResponse,
            TaskRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "projects", description = "Project management endpoints"),
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(v1::health));

    let user_routes = routes!(D => {
        post "/users" => v1::create_user,
        get "/users" => v1::list_users,
        get "/users/{id}" => v1::get_user,
        delete "/users/{id}" => v1::delete_user,
        post "/users/{id}/projects" => v1::create_project,
        get "/users/{id}/projects" => v1::list_user_projects,
    });

    let project_routes = routes!(D => {
        put "/projects/{id}" => v1::update_project,
        delete "/projects/{id}" => v1::delete_project,
        post "/projects/{id}/tasks" => v1::create_task,
        get "/projects/{id}/tasks" => v1::list_project_tasks,
    });

    let task_routes = routes!(D => {
        put "/tasks/{id}" => v1::update_task,
        delete "/tasks/{id}" => v1::delete_task,
    });

    let api_routes = Router::new()
        .merge(user_routes)
        .merge(project_routes)
        .merge(task_routes);

    system_routes
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
