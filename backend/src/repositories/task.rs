//! Repository functions for task sessions.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::{
    models::task::Task,
    types::{TaskId, UserId},
};

const TASK_COLUMNS: &str = "task_id, user_id, start_time, end_time";

/// Opens a new session for the user.
pub async fn insert_task(
    pool: &PgPool,
    user_id: UserId,
    started_at: DateTime<Utc>,
) -> Result<Task, sqlx::Error> {
    let query = format!(
        "INSERT INTO tasks (user_id, start_time) VALUES ($1, $2) RETURNING {}",
        TASK_COLUMNS
    );
    sqlx::query_as::<_, Task>(&query)
        .bind(user_id)
        .bind(started_at)
        .fetch_one(pool)
        .await
}

/// Closes the session only if it is still open.
///
/// The `end_time IS NULL` guard is evaluated at write time, so of two concurrent
/// stops exactly one gets the row back; the other sees `None`.
pub async fn stop_task(
    pool: &PgPool,
    task_id: TaskId,
    ended_at: DateTime<Utc>,
) -> Result<Option<Task>, sqlx::Error> {
    let query = format!(
        "UPDATE tasks SET end_time = $1 WHERE task_id = $2 AND end_time IS NULL RETURNING {}",
        TASK_COLUMNS
    );
    sqlx::query_as::<_, Task>(&query)
        .bind(ended_at)
        .bind(task_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_task(pool: &PgPool, task_id: TaskId) -> Result<Option<Task>, sqlx::Error> {
    let query = format!("SELECT {} FROM tasks WHERE task_id = $1", TASK_COLUMNS);
    sqlx::query_as::<_, Task>(&query)
        .bind(task_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_open_task_for_user(
    pool: &PgPool,
    user_id: UserId,
) -> Result<Option<Task>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM tasks WHERE user_id = $1 AND end_time IS NULL",
        TASK_COLUMNS
    );
    sqlx::query_as::<_, Task>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// All completed sessions of the user, ordered by task id.
pub async fn list_completed_tasks(pool: &PgPool, user_id: UserId) -> Result<Vec<Task>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM tasks WHERE user_id = $1 AND end_time IS NOT NULL ORDER BY task_id",
        TASK_COLUMNS
    );
    sqlx::query_as::<_, Task>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Completed sessions of the user that started within `[from, to]` inclusive.
pub async fn list_completed_tasks_in_period(
    pool: &PgPool,
    user_id: UserId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Task>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM tasks \
         WHERE user_id = $1 AND end_time IS NOT NULL \
         AND start_time >= $2 AND start_time <= $3 \
         ORDER BY task_id",
        TASK_COLUMNS
    );
    sqlx::query_as::<_, Task>(&query)
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
}

pub async fn delete_tasks_for_user(
    conn: &mut PgConnection,
    user_id: UserId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
