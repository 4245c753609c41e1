use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::common::parse_path_id;
use crate::{
    error::AppError,
    models::task::Task,
    state::AppState,
    types::{TaskId, UserId},
};

pub async fn start_task(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let user_id: UserId = parse_path_id(&user_id, "user")?;
    let task = state.task_timer().start(user_id).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn stop_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let task_id: TaskId = parse_path_id(&task_id, "task")?;
    let task = state.task_timer().stop(task_id).await?;
    Ok(Json(task))
}
