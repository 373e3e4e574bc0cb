use chrono::NaiveDate;

use crate::model::task::{Priority, Status, Task};

/// Assignee dimension of the filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssigneeFilter {
    #[default]
    All,
    Unassigned,
    User(i64),
}

/// Deadline-bucket dimension, computed against the local date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueFilter {
    #[default]
    All,
    Overdue,
    Today,
    ThisWeek,
}

impl DueFilter {
    pub fn label(self) -> &'static str {
        match self {
            DueFilter::All => "All",
            DueFilter::Overdue => "Overdue",
            DueFilter::Today => "Today",
            DueFilter::ThisWeek => "This Week",
        }
    }
}

/// The user-controlled filter state for a task collection view.
///
/// Ephemeral: created with the view, reset on demand, never persisted.
/// Every dimension defaults to "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text search over title and description
    pub search: String,
    pub assignee: AssigneeFilter,
    /// `None` means all statuses
    pub status: Option<Status>,
    /// `None` means all priorities
    pub priority: Option<Priority>,
    pub due: DueFilter,
}

impl FilterState {
    /// Back to "everything passes"
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    /// Whether a single task passes every active dimension (logical AND).
    /// `today` is the local date truncated to midnight.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        self.matches_search(task)
            && self.matches_assignee(task)
            && self.status.is_none_or(|s| task.status == s)
            && self.priority.is_none_or(|p| task.priority == p)
            && matches_due(task, self.due, today)
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    fn matches_assignee(&self, task: &Task) -> bool {
        match self.assignee {
            AssigneeFilter::All => true,
            AssigneeFilter::Unassigned => task.assigned_to.is_none(),
            AssigneeFilter::User(id) => task.assigned_to == Some(id),
        }
    }
}

/// Deadline-bucket membership. Tasks without a due date never match any
/// bucket other than `All`.
fn matches_due(task: &Task, filter: DueFilter, today: NaiveDate) -> bool {
    let due = match (filter, task.due_date) {
        (DueFilter::All, _) => return true,
        (_, None) => return false,
        (_, Some(d)) => d,
    };
    match filter {
        DueFilter::All => true,
        DueFilter::Overdue => due < today && task.status != Status::Completed,
        DueFilter::Today => due == today,
        DueFilter::ThisWeek => due >= today && due < today + chrono::Duration::days(7),
    }
}

/// Apply the filter to a task list, preserving input order.
pub fn filter_tasks(tasks: &[Task], filter: &FilterState, today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| filter.matches(t, today))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, status: Status, priority: Priority, due: Option<NaiveDate>) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Task {}", id),
            "project": 1,
            "priority": priority.as_str(),
            "status": status.as_str(),
            "due_date": due.map(|d| d.format("%Y-%m-%d").to_string()),
        }))
        .unwrap()
    }

    fn sample_tasks() -> Vec<Task> {
        let mut t1 = task(1, Status::Todo, Priority::High, None);
        t1.title = "Fix login redirect".into();
        t1.description = Some("users bounce back to the dashboard".into());
        let mut t2 = task(2, Status::Completed, Priority::Low, Some(date(2024, 1, 1)));
        t2.title = "Write changelog".into();
        let mut t3 = task(3, Status::InProgress, Priority::Medium, Some(date(2024, 11, 10)));
        t3.title = "Review PR".into();
        t3.assigned_to = Some(5);
        let mut t4 = task(4, Status::Todo, Priority::High, Some(date(2024, 11, 9)));
        t4.title = "Deploy staging".into();
        t4.assigned_to = Some(6);
        vec![t1, t2, t3, t4]
    }

    const TODAY: fn() -> NaiveDate = || date(2024, 11, 10);

    #[test]
    fn default_filter_passes_everything() {
        let tasks = sample_tasks();
        let out = filter_tasks(&tasks, &FilterState::default(), TODAY());
        assert_eq!(out.len(), tasks.len());
    }

    #[test]
    fn status_filter_exact_match() {
        let tasks = sample_tasks();
        let filter = FilterState {
            status: Some(Status::Todo),
            ..Default::default()
        };
        let ids: Vec<i64> = filter_tasks(&tasks, &filter, TODAY()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let tasks = sample_tasks();
        let mut filter = FilterState {
            search: "LOGIN".into(),
            ..Default::default()
        };
        assert_eq!(filter_tasks(&tasks, &filter, TODAY()).len(), 1);

        // description matches too
        filter.search = "dashboard".into();
        let out = filter_tasks(&tasks, &filter, TODAY());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn assignee_unassigned_keeps_null_only() {
        let tasks = sample_tasks();
        let filter = FilterState {
            assignee: AssigneeFilter::Unassigned,
            ..Default::default()
        };
        let ids: Vec<i64> = filter_tasks(&tasks, &filter, TODAY()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn assignee_specific_id() {
        let tasks = sample_tasks();
        let filter = FilterState {
            assignee: AssigneeFilter::User(5),
            ..Default::default()
        };
        let ids: Vec<i64> = filter_tasks(&tasks, &filter, TODAY()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn overdue_excludes_completed_and_undated() {
        // Only a past-due, not-yet-completed task counts as overdue.
        let tasks = sample_tasks();
        let filter = FilterState {
            due: DueFilter::Overdue,
            ..Default::default()
        };
        let ids: Vec<i64> = filter_tasks(&tasks, &filter, TODAY()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4]); // task 2 is overdue-by-date but completed
    }

    #[test]
    fn today_bucket_is_exact() {
        let tasks = sample_tasks();
        let filter = FilterState {
            due: DueFilter::Today,
            ..Default::default()
        };
        let ids: Vec<i64> = filter_tasks(&tasks, &filter, TODAY()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn this_week_is_today_through_six_days_out() {
        let mut tasks = sample_tasks();
        tasks.push(task(5, Status::Todo, Priority::Low, Some(date(2024, 11, 16))));
        tasks.push(task(6, Status::Todo, Priority::Low, Some(date(2024, 11, 17))));
        let filter = FilterState {
            due: DueFilter::ThisWeek,
            ..Default::default()
        };
        let ids: Vec<i64> = filter_tasks(&tasks, &filter, TODAY()).iter().map(|t| t.id).collect();
        // today (3), today+6 (5); yesterday (4) and today+7 (6) fall outside
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn undated_tasks_never_match_a_bucket() {
        let tasks = sample_tasks();
        for due in [DueFilter::Overdue, DueFilter::Today, DueFilter::ThisWeek] {
            let filter = FilterState {
                due,
                ..Default::default()
            };
            assert!(
                !filter_tasks(&tasks, &filter, TODAY()).iter().any(|t| t.id == 1),
                "undated task leaked through {:?}",
                due
            );
        }
    }

    #[test]
    fn filters_compose_with_and() {
        let tasks = sample_tasks();
        let filter = FilterState {
            status: Some(Status::Todo),
            priority: Some(Priority::High),
            assignee: AssigneeFilter::User(6),
            ..Default::default()
        };
        let ids: Vec<i64> = filter_tasks(&tasks, &filter, TODAY()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn adding_a_constraint_never_grows_the_result() {
        let tasks = sample_tasks();
        let base = FilterState {
            status: Some(Status::Todo),
            ..Default::default()
        };
        let narrowed = FilterState {
            priority: Some(Priority::High),
            ..base.clone()
        };
        let base_len = filter_tasks(&tasks, &base, TODAY()).len();
        let narrowed_len = filter_tasks(&tasks, &narrowed, TODAY()).len();
        assert!(narrowed_len <= base_len);
    }

    #[test]
    fn reset_restores_the_full_set() {
        let tasks = sample_tasks();
        let mut filter = FilterState {
            search: "login".into(),
            status: Some(Status::Todo),
            due: DueFilter::Overdue,
            ..Default::default()
        };
        filter.reset();
        assert!(filter.is_default());
        assert_eq!(filter_tasks(&tasks, &filter, TODAY()).len(), tasks.len());
    }
}
