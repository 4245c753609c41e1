use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::{TaskId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
/// A timed work session owned by one user.
pub struct Task {
    pub task_id: TaskId,
    pub user_id: UserId,
    pub start_time: DateTime<Utc>,
    /// `None` while the timer is still running.
    pub end_time: Option<DateTime<Utc>>,
}

impl Task {
    /// Elapsed time of a completed session.
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}
