//! End-to-end properties of the task collection view-model: the filter →
//! sort → group pipeline and the edit/drop reconciliation rules.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use taskdeck::model::{Priority, Status, Task, TaskWrite};
use taskdeck::view::{
    AssigneeFilter, DueFilter, EditField, EditSession, FilterState, GroupKey, SaveOutcome,
    SortDir, SortKey, drop_update, filter_tasks, group_tasks, save_outcome, schedule_groups,
    sort_tasks,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(id: i64, json: serde_json::Value) -> Task {
    let mut base = serde_json::json!({
        "id": id,
        "title": format!("Task {}", id),
        "project": 1,
        "priority": "medium",
        "status": "todo",
    });
    base.as_object_mut()
        .unwrap()
        .extend(json.as_object().unwrap().clone());
    serde_json::from_value(base).unwrap()
}

fn fixture() -> Vec<Task> {
    vec![
        task(1, serde_json::json!({"title": "Fix login redirect", "priority": "high", "due_date": "2024-11-09"})),
        task(2, serde_json::json!({"title": "Write changelog", "status": "completed", "priority": "low", "due_date": "2024-01-01"})),
        task(3, serde_json::json!({"title": "Review PR", "status": "in_progress", "assigned_to": 5,
            "assignee": {"id": 5, "username": "ab", "first_name": "A", "last_name": "B"}, "due_date": "2024-11-10"})),
        task(4, serde_json::json!({"title": "Deploy staging", "priority": "high", "assigned_to": 6,
            "assignee": {"id": 6, "username": "nk", "first_name": "Noor", "last_name": "Khan"}})),
        task(5, serde_json::json!({"title": "Update deps", "due_date": "2024-11-15"})),
    ]
}

const TODAY: fn() -> NaiveDate = || date(2024, 11, 10);

// ---------------------------------------------------------------------------
// Filter properties
// ---------------------------------------------------------------------------

#[test]
fn filter_output_is_always_a_subset() {
    let tasks = fixture();
    let filters = [
        FilterState::default(),
        FilterState { search: "e".into(), ..Default::default() },
        FilterState { status: Some(Status::Todo), ..Default::default() },
        FilterState { priority: Some(Priority::High), ..Default::default() },
        FilterState { assignee: AssigneeFilter::Unassigned, ..Default::default() },
        FilterState { due: DueFilter::Overdue, ..Default::default() },
    ];
    for filter in filters {
        let out = filter_tasks(&tasks, &filter, TODAY());
        assert!(out.len() <= tasks.len());
        for kept in &out {
            assert!(tasks.iter().any(|t| t.id == kept.id));
        }
    }
}

#[test]
fn each_added_constraint_narrows_monotonically() {
    let tasks = fixture();
    let mut filter = FilterState::default();
    let mut last = filter_tasks(&tasks, &filter, TODAY()).len();

    filter.status = Some(Status::Todo);
    let narrowed = filter_tasks(&tasks, &filter, TODAY()).len();
    assert!(narrowed <= last);
    last = narrowed;

    filter.priority = Some(Priority::High);
    let narrowed = filter_tasks(&tasks, &filter, TODAY()).len();
    assert!(narrowed <= last);
    last = narrowed;

    filter.assignee = AssigneeFilter::User(6);
    let narrowed = filter_tasks(&tasks, &filter, TODAY()).len();
    assert!(narrowed <= last);
}

#[test]
fn reset_after_any_filtering_restores_everything() {
    let tasks = fixture();
    let mut filter = FilterState {
        search: "deploy".into(),
        status: Some(Status::Todo),
        priority: Some(Priority::High),
        due: DueFilter::ThisWeek,
        assignee: AssigneeFilter::User(6),
    };
    assert!(filter_tasks(&tasks, &filter, TODAY()).len() < tasks.len());
    filter.reset();
    assert_eq!(filter_tasks(&tasks, &filter, TODAY()).len(), tasks.len());
}

#[test]
fn status_filter_keeps_exact_matches_only() {
    // Given two tasks, filtering by status=todo yields only the todo one.
    let tasks = vec![
        task(1, serde_json::json!({"priority": "high", "due_date": null})),
        task(2, serde_json::json!({"status": "completed", "priority": "low", "due_date": "2024-01-01"})),
    ];
    let filter = FilterState {
        status: Some(Status::Todo),
        ..Default::default()
    };
    let out = filter_tasks(&tasks, &filter, TODAY());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 1);
}

#[test]
fn overdue_bucket_needs_past_due_and_open_status() {
    // Due yesterday and not completed is overdue; today and undated are not.
    let tasks = vec![
        task(1, serde_json::json!({"due_date": "2024-11-10"})),
        task(2, serde_json::json!({"due_date": "2024-11-09"})),
        task(3, serde_json::json!({"due_date": null})),
    ];
    let filter = FilterState {
        due: DueFilter::Overdue,
        ..Default::default()
    };
    let out = filter_tasks(&tasks, &filter, TODAY());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 2);
}

// ---------------------------------------------------------------------------
// Sort properties
// ---------------------------------------------------------------------------

#[test]
fn sorting_twice_changes_nothing() {
    for key in [SortKey::Title, SortKey::DueDate, SortKey::Priority, SortKey::Status] {
        for dir in [SortDir::Asc, SortDir::Desc] {
            let mut tasks = fixture();
            sort_tasks(&mut tasks, key, dir);
            let once: Vec<i64> = tasks.iter().map(|t| t.id).collect();
            sort_tasks(&mut tasks, key, dir);
            let twice: Vec<i64> = tasks.iter().map(|t| t.id).collect();
            assert_eq!(once, twice, "key={:?} dir={:?}", key, dir);
        }
    }
}

#[test]
fn equal_keys_preserve_input_order() {
    let mut tasks = vec![
        task(10, serde_json::json!({"title": "dup"})),
        task(11, serde_json::json!({"title": "dup"})),
        task(12, serde_json::json!({"title": "dup"})),
    ];
    sort_tasks(&mut tasks, SortKey::Title, SortDir::Asc);
    let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[test]
fn priority_sort_puts_high_first() {
    let mut tasks = vec![
        task(1, serde_json::json!({"priority": "high", "due_date": null})),
        task(2, serde_json::json!({"status": "completed", "priority": "low", "due_date": "2024-01-01"})),
    ];
    sort_tasks(&mut tasks, SortKey::Priority, SortDir::Asc);
    let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]); // high before low
}

// ---------------------------------------------------------------------------
// Grouping properties
// ---------------------------------------------------------------------------

#[test]
fn status_and_priority_groupings_partition_with_empties() {
    let tasks = fixture();
    for key in [GroupKey::Status, GroupKey::Priority] {
        let groups = group_tasks(&tasks, key);
        assert_eq!(groups.len(), 3, "fixed bucket count for {:?}", key);
        let total: usize = groups.iter().map(|g| g.tasks.len()).sum();
        assert_eq!(total, tasks.len());
        let mut ids: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.tasks.iter().map(|t| t.id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tasks.len(), "buckets are disjoint");
    }
}

#[test]
fn assignee_grouping_pins_unassigned_first() {
    let tasks = vec![
        task(1, serde_json::json!({"assigned_to": null})),
        task(2, serde_json::json!({"assigned_to": 5,
            "assignee": {"id": 5, "username": "ab", "first_name": "A", "last_name": "B"}})),
    ];
    let groups = group_tasks(&tasks, GroupKey::Assignee);
    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Unassigned", "A B"]);
    assert_eq!(groups[0].tasks[0].id, 1);
    assert_eq!(groups[1].tasks[0].id, 2);
}

#[test]
fn schedule_partitions_without_empty_buckets() {
    let tasks = fixture();
    let groups = schedule_groups(&tasks, TODAY());
    assert!(groups.iter().all(|g| !g.tasks.is_empty()));
    let total: usize = groups.iter().map(|g| g.tasks.len()).sum();
    assert_eq!(total, tasks.len());
    let mut ids: Vec<i64> = groups
        .iter()
        .flat_map(|g| g.tasks.iter().map(|t| t.id))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), tasks.len());
}

#[test]
fn undated_tasks_always_land_in_no_due_date() {
    let tasks = vec![task(4, serde_json::json!({"priority": "high", "status": "in_progress"}))];
    let groups = schedule_groups(&tasks, TODAY());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "No Due Date");
}

// ---------------------------------------------------------------------------
// Pipeline: filter → sort → group survives composition
// ---------------------------------------------------------------------------

#[test]
fn full_pipeline_composes() {
    let tasks = fixture();
    let filter = FilterState {
        status: Some(Status::Todo),
        ..Default::default()
    };
    let mut filtered = filter_tasks(&tasks, &filter, TODAY());
    sort_tasks(&mut filtered, SortKey::Priority, SortDir::Asc);
    let groups = group_tasks(&filtered, GroupKey::Priority);

    // Every task still todo, high-priority bucket comes first and its
    // members keep the sorted order.
    assert!(groups.iter().flat_map(|g| &g.tasks).all(|t| t.status == Status::Todo));
    assert_eq!(groups[0].label, "High Priority");
    let high_ids: Vec<i64> = groups[0].tasks.iter().map(|t| t.id).collect();
    assert_eq!(high_ids, vec![1, 4]);
}

// ---------------------------------------------------------------------------
// Reconciliation rules: what does and does not reach the network
// ---------------------------------------------------------------------------

#[test]
fn unchanged_inline_edit_never_builds_a_request() {
    let tasks = fixture();
    for field in [EditField::Title, EditField::Description, EditField::DueDate] {
        let session = EditSession::begin(&tasks[0], field);
        assert_eq!(
            save_outcome(&session, &tasks[0]).unwrap(),
            SaveOutcome::Unchanged,
            "{:?}",
            field
        );
    }
}

#[test]
fn whitespace_title_keeps_edit_mode_and_sends_nothing() {
    let tasks = fixture();
    let mut session = EditSession::begin(&tasks[0], EditField::Title);
    session.buffer = "  \t ".into();
    assert!(save_outcome(&session, &tasks[0]).is_err());
    // The session object is untouched — the caller keeps it alive
    assert_eq!(session.buffer, "  \t ");
}

#[test]
fn same_column_drop_builds_no_request() {
    let tasks = fixture();
    assert!(drop_update(&tasks[0], Some(tasks[0].status)).is_none());
    assert!(drop_update(&tasks[0], None).is_none());
}

#[test]
fn cross_column_drop_differs_only_in_status() {
    let tasks = fixture();
    let write = drop_update(&tasks[0], Some(Status::Completed)).unwrap();
    let mut expected = TaskWrite::from_task(&tasks[0]);
    expected.status = Status::Completed;
    assert_eq!(write, expected);
}
