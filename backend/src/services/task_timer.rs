use chrono::Utc;
use sqlx::PgPool;

use crate::{
    error::{is_foreign_key_violation, is_unique_violation, AppError},
    models::task::Task,
    repositories::{task as task_repo, user as user_repo},
    types::{TaskId, UserId},
};

/// Starts and stops work sessions.
#[derive(Clone)]
pub struct TaskTimer {
    pool: PgPool,
}

impl TaskTimer {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a session for an existing user. A user holds at most one open
    /// session; the partial unique index on `tasks(user_id)` settles races.
    pub async fn start(&self, user_id: UserId) -> Result<Task, AppError> {
        if !user_repo::user_exists(&self.pool, user_id).await? {
            tracing::warn!(%user_id, "cannot start task for unknown user");
            return Err(AppError::NotFound(format!("User with id {} not found", user_id)));
        }

        if let Some(open) = task_repo::find_open_task_for_user(&self.pool, user_id).await? {
            tracing::warn!(%user_id, task_id = %open.task_id, "user already has a running task");
            return Err(running_task_conflict(user_id));
        }

        match task_repo::insert_task(&self.pool, user_id, Utc::now()).await {
            Ok(task) => {
                tracing::info!(%user_id, task_id = %task.task_id, "task timer started");
                Ok(task)
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::warn!(%user_id, "concurrent start lost the race");
                Err(running_task_conflict(user_id))
            }
            // The user was deleted between the existence check and the insert.
            Err(e) if is_foreign_key_violation(&e) => Err(AppError::NotFound(format!(
                "User with id {} not found",
                user_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Closes an open session. Fails without writing anything when the task
    /// does not exist or has already been stopped.
    pub async fn stop(&self, task_id: TaskId) -> Result<Task, AppError> {
        if let Some(task) = task_repo::stop_task(&self.pool, task_id, Utc::now()).await? {
            tracing::info!(%task_id, user_id = %task.user_id, "task timer stopped");
            return Ok(task);
        }

        match task_repo::find_task(&self.pool, task_id).await? {
            Some(_) => {
                tracing::warn!(%task_id, "task already stopped");
                Err(AppError::AlreadyStopped(format!(
                    "Task with id {} is already stopped",
                    task_id
                )))
            }
            None => {
                tracing::warn!(%task_id, "task does not exist");
                Err(AppError::NotFound(format!("Task with id {} not found", task_id)))
            }
        }
    }
}

fn running_task_conflict(user_id: UserId) -> AppError {
    AppError::Conflict(format!("User {} already has a running task", user_id))
}
