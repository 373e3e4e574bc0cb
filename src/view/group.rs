use indexmap::IndexMap;

use crate::model::task::{Priority, Status, Task};

/// How the task list is partitioned into buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKey {
    #[default]
    None,
    Status,
    Priority,
    Assignee,
}

impl GroupKey {
    pub fn label(self) -> &'static str {
        match self {
            GroupKey::None => "None",
            GroupKey::Status => "Status",
            GroupKey::Priority => "Priority",
            GroupKey::Assignee => "Assignee",
        }
    }

    /// Cycle through group keys (for the group control)
    pub fn next(self) -> GroupKey {
        match self {
            GroupKey::None => GroupKey::Status,
            GroupKey::Status => GroupKey::Priority,
            GroupKey::Priority => GroupKey::Assignee,
            GroupKey::Assignee => GroupKey::None,
        }
    }
}

/// One named bucket of the partition
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup {
    pub label: String,
    pub tasks: Vec<Task>,
}

impl TaskGroup {
    fn new(label: impl Into<String>) -> Self {
        TaskGroup {
            label: label.into(),
            tasks: Vec::new(),
        }
    }
}

fn priority_group_label(p: Priority) -> &'static str {
    match p {
        Priority::High => "High Priority",
        Priority::Medium => "Medium Priority",
        Priority::Low => "Low Priority",
    }
}

/// Partition an already filtered+sorted list into labelled buckets,
/// preserving intra-bucket order.
///
/// Status and priority groupings use fixed buckets in fixed order and keep
/// empty buckets so the UI can render empty-state hints. The assignee
/// grouping has an "Unassigned" bucket first, then one bucket per distinct
/// assignee in order of first appearance.
pub fn group_tasks(tasks: &[Task], key: GroupKey) -> Vec<TaskGroup> {
    match key {
        GroupKey::None => {
            let mut all = TaskGroup::new("All Tasks");
            all.tasks = tasks.to_vec();
            vec![all]
        }
        GroupKey::Status => {
            let mut groups: Vec<TaskGroup> = Status::ALL
                .iter()
                .map(|s| TaskGroup::new(s.label()))
                .collect();
            for task in tasks {
                let idx = Status::ALL
                    .iter()
                    .position(|s| *s == task.status)
                    .unwrap_or(0);
                groups[idx].tasks.push(task.clone());
            }
            groups
        }
        GroupKey::Priority => {
            let mut groups: Vec<TaskGroup> = Priority::ALL
                .iter()
                .map(|p| TaskGroup::new(priority_group_label(*p)))
                .collect();
            for task in tasks {
                let idx = Priority::ALL
                    .iter()
                    .position(|p| *p == task.priority)
                    .unwrap_or(0);
                groups[idx].tasks.push(task.clone());
            }
            groups
        }
        GroupKey::Assignee => {
            // IndexMap keeps first-appearance order; "Unassigned" is pinned first.
            let mut buckets: IndexMap<String, Vec<Task>> = IndexMap::new();
            buckets.insert("Unassigned".to_string(), Vec::new());
            for task in tasks {
                let label = if task.assigned_to.is_none() {
                    "Unassigned".to_string()
                } else {
                    task.assignee_name()
                };
                buckets.entry(label).or_default().push(task.clone());
            }
            buckets
                .into_iter()
                .map(|(label, tasks)| TaskGroup { label, tasks })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: i64, status: Status, priority: Priority) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Task {}", id),
            "project": 1,
            "priority": priority.as_str(),
            "status": status.as_str(),
        }))
        .unwrap()
    }

    fn assigned(id: i64, user_id: i64, first: &str, last: &str) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Task {}", id),
            "project": 1,
            "assigned_to": user_id,
            "assignee": {"id": user_id, "username": "u", "first_name": first, "last_name": last},
            "priority": "medium",
            "status": "todo",
        }))
        .unwrap()
    }

    #[test]
    fn none_is_a_single_bucket() {
        let tasks = vec![task(1, Status::Todo, Priority::Low)];
        let groups = group_tasks(&tasks, GroupKey::None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "All Tasks");
        assert_eq!(groups[0].tasks.len(), 1);
    }

    #[test]
    fn status_buckets_are_fixed_and_keep_empties() {
        let tasks = vec![
            task(1, Status::Completed, Priority::Low),
            task(2, Status::Todo, Priority::Low),
        ];
        let groups = group_tasks(&tasks, GroupKey::Status);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["To Do", "In Progress", "Completed"]);
        assert_eq!(groups[0].tasks[0].id, 2);
        assert!(groups[1].tasks.is_empty()); // retained, not dropped
        assert_eq!(groups[2].tasks[0].id, 1);
    }

    #[test]
    fn priority_buckets_high_to_low() {
        let tasks = vec![
            task(1, Status::Todo, Priority::Low),
            task(2, Status::Todo, Priority::High),
        ];
        let groups = group_tasks(&tasks, GroupKey::Priority);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["High Priority", "Medium Priority", "Low Priority"]);
        assert_eq!(groups[0].tasks[0].id, 2);
        assert!(groups[1].tasks.is_empty());
    }

    #[test]
    fn status_grouping_is_a_partition() {
        let tasks: Vec<Task> = (0..9)
            .map(|i| {
                task(
                    i,
                    Status::ALL[(i % 3) as usize],
                    Priority::ALL[(i % 3) as usize],
                )
            })
            .collect();
        let groups = group_tasks(&tasks, GroupKey::Status);
        let total: usize = groups.iter().map(|g| g.tasks.len()).sum();
        assert_eq!(total, tasks.len());
        // disjoint: every id appears exactly once
        let mut seen: Vec<i64> = groups.iter().flat_map(|g| g.tasks.iter().map(|t| t.id)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), tasks.len());
    }

    #[test]
    fn assignee_unassigned_bucket_is_always_first() {
        let tasks = vec![task(1, Status::Todo, Priority::Low), assigned(2, 5, "A", "B")];
        let groups = group_tasks(&tasks, GroupKey::Assignee);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Unassigned", "A B"]);
        assert_eq!(groups[0].tasks[0].id, 1);
        assert_eq!(groups[1].tasks[0].id, 2);
    }

    #[test]
    fn assignee_buckets_in_first_appearance_order() {
        let tasks = vec![
            assigned(1, 7, "Noor", "Khan"),
            assigned(2, 5, "A", "B"),
            assigned(3, 7, "Noor", "Khan"),
        ];
        let groups = group_tasks(&tasks, GroupKey::Assignee);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Unassigned", "Noor Khan", "A B"]);
        let noor_ids: Vec<i64> = groups[1].tasks.iter().map(|t| t.id).collect();
        assert_eq!(noor_ids, vec![1, 3]);
    }

    #[test]
    fn empty_input_keeps_fixed_buckets_only() {
        let groups = group_tasks(&[], GroupKey::Status);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.tasks.is_empty()));

        let groups = group_tasks(&[], GroupKey::Assignee);
        assert_eq!(groups.len(), 1); // just "Unassigned"
    }
}
