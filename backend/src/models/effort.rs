//! Effort figures derived from completed task sessions.
//!
//! `minutes` carries the *total* minute count of a session, not the remainder
//! after whole hours, and the ranking key is `hours * 60 + minutes`. Existing
//! work-log consumers depend on both, so a 90-minute session reports
//! `hours = 1, minutes = 90`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::task::Task;
use crate::types::{TaskId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserEffort {
    pub user_id: UserId,
    pub task_id: TaskId,
    /// Whole hours of the session.
    pub hours: i64,
    /// Whole minutes of the session (total, not modulo 60).
    pub minutes: i64,
}

impl UserEffort {
    pub fn rank_key(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

/// Turns every completed task into a [`UserEffort`]; open tasks are skipped.
pub fn compute_effort(tasks: &[Task]) -> Vec<UserEffort> {
    tasks
        .iter()
        .filter_map(|task| {
            let duration = task.duration()?;
            Some(UserEffort {
                user_id: task.user_id,
                task_id: task.task_id,
                hours: duration.num_hours(),
                minutes: duration.num_minutes(),
            })
        })
        .collect()
}

/// Sorts efforts by descending rank key. Equal keys keep their input order.
pub fn rank_efforts(efforts: &mut [UserEffort]) {
    if efforts.len() > 1 {
        efforts.sort_by_key(|effort| std::cmp::Reverse(effort.rank_key()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap()
    }

    fn completed(task_id: i64, minutes: i64) -> Task {
        Task {
            task_id: TaskId::new(task_id),
            user_id: UserId::new(7),
            start_time: t0(),
            end_time: Some(t0() + Duration::minutes(minutes)),
        }
    }

    fn effort(task_id: i64, hours: i64, minutes: i64) -> UserEffort {
        UserEffort {
            user_id: UserId::new(7),
            task_id: TaskId::new(task_id),
            hours,
            minutes,
        }
    }

    #[test]
    fn ninety_minute_session_reports_one_hour_and_ninety_minutes() {
        let efforts = compute_effort(&[completed(1, 90)]);
        assert_eq!(efforts.len(), 1);
        assert_eq!(efforts[0].user_id, UserId::new(7));
        assert_eq!(efforts[0].hours, 1);
        assert_eq!(efforts[0].minutes, 90);
        assert_eq!(efforts[0].rank_key(), 150);
    }

    #[test]
    fn partial_units_are_floored() {
        let task = Task {
            end_time: Some(t0() + Duration::seconds(59 * 60 + 59)),
            ..completed(2, 0)
        };
        let efforts = compute_effort(&[task]);
        assert_eq!(efforts[0].hours, 0);
        assert_eq!(efforts[0].minutes, 59);
    }

    #[test]
    fn open_tasks_are_skipped() {
        let open = Task {
            end_time: None,
            ..completed(3, 0)
        };
        let efforts = compute_effort(&[open, completed(4, 10)]);
        assert_eq!(efforts.len(), 1);
        assert_eq!(efforts[0].task_id, TaskId::new(4));
    }

    #[test]
    fn rank_is_descending_by_rank_key() {
        let mut efforts = vec![
            effort(1, 0, 5),
            effort(2, 2, 130),
            effort(3, 1, 61),
            effort(4, 0, 0),
        ];
        rank_efforts(&mut efforts);
        let ids: Vec<i64> = efforts.iter().map(|e| e.task_id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
        assert!(efforts
            .windows(2)
            .all(|pair| pair[0].rank_key() >= pair[1].rank_key()));
    }

    #[test]
    fn rank_keeps_input_order_for_ties() {
        let mut efforts = vec![effort(10, 0, 30), effort(11, 0, 45), effort(12, 0, 30)];
        rank_efforts(&mut efforts);
        let ids: Vec<i64> = efforts.iter().map(|e| e.task_id.get()).collect();
        assert_eq!(ids, vec![11, 10, 12]);
    }

    #[test]
    fn rank_is_noop_for_empty_and_singleton() {
        let mut empty: Vec<UserEffort> = Vec::new();
        rank_efforts(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![effort(1, 3, 200)];
        rank_efforts(&mut single);
        assert_eq!(single, vec![effort(1, 3, 200)]);
    }
}
