//! Completed-session retrieval and the ranked effort report built from it.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        effort::{compute_effort, rank_efforts, UserEffort},
        task::Task,
    },
    repositories::task as task_repo,
    types::UserId,
};

/// Inclusive window over task start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// Parses optional RFC 3339 bounds. Both absent (or empty) means no window;
    /// exactly one bound, a malformed timestamp or `start > end` is rejected.
    pub fn from_raw(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>, AppError> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (None, None) => Ok(None),
            (Some(_), None) | (None, Some(_)) => Err(AppError::BadRequest(
                "startPeriod and endPeriod must be provided together".to_string(),
            )),
            (Some(start), Some(end)) => {
                let start = parse_timestamp(start, "startPeriod")?;
                let end = parse_timestamp(end, "endPeriod")?;
                if start > end {
                    return Err(AppError::BadRequest(
                        "startPeriod must not be after endPeriod".to_string(),
                    ));
                }
                Ok(Some(Self { start, end }))
            }
        }
    }
}

fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            tracing::warn!(field, value = raw, "invalid period timestamp");
            AppError::BadRequest(format!("Invalid {} format, expected RFC 3339", field))
        })
}

#[derive(Clone)]
pub struct WorkLog {
    pool: PgPool,
}

impl WorkLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Completed sessions of the user, optionally restricted to a start-time window.
    pub async fn sessions(
        &self,
        user_id: UserId,
        period: Option<Period>,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = match period {
            Some(period) => {
                task_repo::list_completed_tasks_in_period(
                    &self.pool,
                    user_id,
                    period.start,
                    period.end,
                )
                .await?
            }
            None => task_repo::list_completed_tasks(&self.pool, user_id).await?,
        };
        Ok(tasks)
    }

    /// Effort per completed session, ranked by descending duration.
    pub async fn report(
        &self,
        user_id: UserId,
        period: Option<Period>,
    ) -> Result<Vec<UserEffort>, AppError> {
        let tasks = self.sessions(user_id, period).await?;
        let mut efforts = compute_effort(&tasks);
        rank_efforts(&mut efforts);
        tracing::debug!(%user_id, sessions = efforts.len(), "work log computed");
        Ok(efforts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn no_bounds_means_no_period() {
        assert_eq!(Period::from_raw(None, None).expect("ok"), None);
        assert_eq!(Period::from_raw(Some(""), Some(" ")).expect("ok"), None);
    }

    #[test]
    fn single_bound_is_rejected() {
        let err = Period::from_raw(Some("2024-01-01T00:00:00Z"), None).expect_err("one bound");
        assert!(matches!(err, AppError::BadRequest(_)));
        let err = Period::from_raw(None, Some("2024-01-01T00:00:00Z")).expect_err("one bound");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn parses_rfc3339_with_offsets() {
        let period = Period::from_raw(
            Some("2024-01-01T09:00:00+03:00"),
            Some("2024-01-31T23:59:59Z"),
        )
        .expect("valid")
        .expect("period");
        assert_eq!(period.start, Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap());
        assert_eq!(period.end, Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn malformed_or_inverted_bounds_are_rejected() {
        assert!(Period::from_raw(Some("2024-01-01"), Some("2024-01-02T00:00:00Z")).is_err());
        assert!(Period::from_raw(Some("2024-01-01T00:00:00"), Some("2024-01-02T00:00:00Z")).is_err());
        assert!(
            Period::from_raw(Some("2024-02-01T00:00:00Z"), Some("2024-01-01T00:00:00Z")).is_err()
        );
    }

    #[test]
    fn equal_bounds_form_a_valid_instant_window() {
        let period = Period::from_raw(Some("2024-01-01T00:00:00Z"), Some("2024-01-01T00:00:00Z"))
            .expect("valid")
            .expect("period");
        assert_eq!(period.start, period.end);
    }
}
