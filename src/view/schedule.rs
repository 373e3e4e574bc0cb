use chrono::{Datelike, Duration, NaiveDate};

use crate::model::task::Task;

use super::group::TaskGroup;

/// Due-date proximity buckets for the personal "My Tasks" view.
///
/// Unlike the status/priority groupings, empty buckets are omitted from
/// the output entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    PastDates,
    Today,
    ThisWeek,
    NextWeek,
    Later,
    NoDueDate,
}

impl DateBucket {
    /// Fixed display order
    pub const ORDER: [DateBucket; 6] = [
        DateBucket::PastDates,
        DateBucket::Today,
        DateBucket::ThisWeek,
        DateBucket::NextWeek,
        DateBucket::Later,
        DateBucket::NoDueDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DateBucket::PastDates => "Past Dates",
            DateBucket::Today => "Today",
            DateBucket::ThisWeek => "This week",
            DateBucket::NextWeek => "Next week",
            DateBucket::Later => "Later",
            DateBucket::NoDueDate => "No Due Date",
        }
    }

    /// Classify a task. Checks run in bucket order, so "Today" wins over
    /// "This week" even though today is inside the week range. A task with
    /// no due date always lands in `NoDueDate`, whatever its other fields.
    pub fn for_task(task: &Task, today: NaiveDate) -> DateBucket {
        let due = match task.due_date {
            Some(d) => d,
            None => return DateBucket::NoDueDate,
        };
        // Week = ISO week, Monday through Sunday.
        let end_of_week = today + Duration::days(6 - i64::from(today.weekday().num_days_from_monday()));
        if due < today {
            DateBucket::PastDates
        } else if due == today {
            DateBucket::Today
        } else if due <= end_of_week {
            DateBucket::ThisWeek
        } else if due <= end_of_week + Duration::days(7) {
            DateBucket::NextWeek
        } else {
            DateBucket::Later
        }
    }
}

/// Partition tasks into date buckets, omitting empty ones.
pub fn schedule_groups(tasks: &[Task], today: NaiveDate) -> Vec<TaskGroup> {
    DateBucket::ORDER
        .iter()
        .filter_map(|bucket| {
            let members: Vec<Task> = tasks
                .iter()
                .filter(|t| DateBucket::for_task(t, today) == *bucket)
                .cloned()
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(TaskGroup {
                    label: bucket.label().to_string(),
                    tasks: members,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, due: Option<NaiveDate>) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Task {}", id),
            "project": 1,
            "priority": "medium",
            "status": "todo",
            "due_date": due.map(|d| d.format("%Y-%m-%d").to_string()),
        }))
        .unwrap()
    }

    // 2024-11-06 is a Wednesday; its week ends Sunday 2024-11-10.
    const TODAY: fn() -> NaiveDate = || date(2024, 11, 6);

    #[test]
    fn classification_boundaries() {
        let today = TODAY();
        let cases = [
            (Some(date(2024, 11, 5)), DateBucket::PastDates),
            (Some(date(2024, 11, 6)), DateBucket::Today),
            (Some(date(2024, 11, 7)), DateBucket::ThisWeek),
            (Some(date(2024, 11, 10)), DateBucket::ThisWeek), // Sunday, inclusive
            (Some(date(2024, 11, 11)), DateBucket::NextWeek), // following Monday
            (Some(date(2024, 11, 17)), DateBucket::NextWeek), // following Sunday
            (Some(date(2024, 11, 18)), DateBucket::Later),
            (None, DateBucket::NoDueDate),
        ];
        for (due, expected) in cases {
            assert_eq!(
                DateBucket::for_task(&task(1, due), today),
                expected,
                "due={:?}",
                due
            );
        }
    }

    #[test]
    fn monday_week_spans_to_its_own_sunday() {
        // When today is Monday the week has six days left.
        let monday = date(2024, 11, 4);
        assert_eq!(
            DateBucket::for_task(&task(1, Some(date(2024, 11, 10))), monday),
            DateBucket::ThisWeek
        );
        assert_eq!(
            DateBucket::for_task(&task(1, Some(date(2024, 11, 11))), monday),
            DateBucket::NextWeek
        );
    }

    #[test]
    fn sunday_today_has_empty_rest_of_week() {
        let sunday = date(2024, 11, 10);
        assert_eq!(
            DateBucket::for_task(&task(1, Some(sunday)), sunday),
            DateBucket::Today
        );
        // Monday is already next week
        assert_eq!(
            DateBucket::for_task(&task(1, Some(date(2024, 11, 11))), sunday),
            DateBucket::NextWeek
        );
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let tasks = vec![task(1, Some(date(2024, 11, 6))), task(2, None)];
        let groups = schedule_groups(&tasks, TODAY());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "No Due Date"]);
    }

    #[test]
    fn schedule_is_a_partition() {
        let tasks = vec![
            task(1, Some(date(2024, 11, 1))),
            task(2, Some(date(2024, 11, 6))),
            task(3, Some(date(2024, 11, 8))),
            task(4, Some(date(2024, 11, 14))),
            task(5, Some(date(2025, 1, 1))),
            task(6, None),
        ];
        let groups = schedule_groups(&tasks, TODAY());
        let total: usize = groups.iter().map(|g| g.tasks.len()).sum();
        assert_eq!(total, tasks.len());
        let mut seen: Vec<i64> = groups.iter().flat_map(|g| g.tasks.iter().map(|t| t.id)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), tasks.len());
        assert!(groups.iter().all(|g| !g.tasks.is_empty()));
    }

    #[test]
    fn bucket_order_is_fixed() {
        let tasks = vec![
            task(1, None),
            task(2, Some(date(2024, 11, 1))),
            task(3, Some(date(2025, 1, 1))),
        ];
        let groups = schedule_groups(&tasks, TODAY());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Past Dates", "Later", "No Due Date"]);
    }
}
