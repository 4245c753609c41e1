#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::{health::HealthResponse, users::UserListQuery, worklog::WorkLogQuery},
    models::{
        effort::UserEffort,
        task::Task,
        user::{AddUserRequest, User, UserFields},
        PaginatedResponse,
    },
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_users_doc,
        add_user_doc,
        update_user_doc,
        delete_user_doc,
        start_task_doc,
        stop_task_doc,
        work_log_doc,
        health_doc
    ),
    components(
        schemas(
            User,
            AddUserRequest,
            UserFields,
            PaginatedResponse<User>,
            Task,
            UserEffort,
            HealthResponse
        )
    ),
    tags(
        (name = "Users", description = "User directory"),
        (name = "Tasks", description = "Task timer"),
        (name = "WorkLog", description = "Effort reports"),
        (name = "Health", description = "Liveness and database reachability")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of users matching every supplied filter", body = PaginatedResponse<User>),
        (status = 500, description = "Storage failure")
    ),
    tag = "Users"
)]
fn list_users_doc() {}

#[utoipa::path(
    post,
    path = "/users/add",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User created from passport data", body = User),
        (status = 400, description = "Passport number is not `series number`"),
        (status = 409, description = "Passport number already registered"),
        (status = 502, description = "Passport lookup failed or returned an unreadable body")
    ),
    tag = "Users"
)]
fn add_user_doc() {}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id"), UserFields),
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid id or no fields supplied"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Passport number already registered")
    ),
    tag = "Users"
)]
fn update_user_doc() {}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User and their tasks deleted", body = String),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
fn delete_user_doc() {}

#[utoipa::path(
    post,
    path = "/users/{id}/task/start",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 201, description = "Open task created", body = Task),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has an open task")
    ),
    tag = "Tasks"
)]
fn start_task_doc() {}

#[utoipa::path(
    post,
    path = "/users/task/{id}/stop",
    params(("id" = i64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task closed", body = Task),
        (status = 404, description = "Task not found"),
        (status = 409, description = "Task already stopped")
    ),
    tag = "Tasks"
)]
fn stop_task_doc() {}

#[utoipa::path(
    get,
    path = "/users/{id}/worklog",
    params(("id" = i64, Path, description = "User id"), WorkLogQuery),
    responses(
        (status = 200, description = "Completed tasks ranked by effort, largest first", body = [UserEffort]),
        (status = 400, description = "Malformed or one-sided period")
    ),
    tag = "WorkLog"
)]
fn work_log_doc() {}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "Health"
)]
fn health_doc() {}
