use crate::model::task::{Status, Task, TaskWrite};

/// Board columns, in display order. Columns are exactly the status values.
pub const COLUMNS: [Status; 3] = Status::ALL;

/// A task picked up for a board move. Holding a gesture is the terminal
/// equivalent of the pointer drag threshold: nothing mutates until the
/// task has been deliberately picked up and explicitly dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveGesture {
    pub task_id: i64,
    /// Column the task was in when picked up
    pub source: Status,
    /// Column currently hovered as the drop target
    pub target: Status,
}

impl MoveGesture {
    pub fn pick_up(task: &Task) -> Self {
        MoveGesture {
            task_id: task.id,
            source: task.status,
            target: task.status,
        }
    }

    /// Hover one column left/right, clamped to the board edges.
    pub fn shift_target(&mut self, delta: i32) {
        let idx = COLUMNS.iter().position(|c| *c == self.target).unwrap_or(0) as i32;
        let next = (idx + delta).clamp(0, COLUMNS.len() as i32 - 1) as usize;
        self.target = COLUMNS[next];
    }
}

/// Resolve a drop: `None` target (released outside any column) or a drop
/// on the source column is not a mutation.
pub fn drop_target(source: Status, target: Option<Status>) -> Option<Status> {
    match target {
        Some(t) if t != source => Some(t),
        _ => None,
    }
}

/// Build the single update a cross-column drop produces: the full task
/// with only `status` changed.
pub fn drop_update(task: &Task, target: Option<Status>) -> Option<TaskWrite> {
    let new_status = drop_target(task.status, target)?;
    let mut write = TaskWrite::from_task(task);
    write.status = new_status;
    Some(write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use pretty_assertions::assert_eq;

    fn sample_task() -> Task {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Ship release",
            "description": "cut the tag",
            "project": 2,
            "assigned_to": 9,
            "priority": "high",
            "status": "todo",
            "due_date": "2024-12-01",
        }))
        .unwrap()
    }

    #[test]
    fn drop_outside_any_column_is_a_noop() {
        assert_eq!(drop_target(Status::Todo, None), None);
        assert!(drop_update(&sample_task(), None).is_none());
    }

    #[test]
    fn drop_on_own_column_is_a_noop() {
        assert_eq!(drop_target(Status::Todo, Some(Status::Todo)), None);
        assert!(drop_update(&sample_task(), Some(Status::Todo)).is_none());
    }

    #[test]
    fn cross_column_drop_changes_only_status() {
        let task = sample_task();
        let write = drop_update(&task, Some(Status::InProgress)).unwrap();
        assert_eq!(write.status, Status::InProgress);

        let mut expected = TaskWrite::from_task(&task);
        expected.status = Status::InProgress;
        assert_eq!(write, expected);
        assert_eq!(write.title, "Ship release");
        assert_eq!(write.assigned_to, Some(9));
        assert_eq!(write.priority, Priority::High);
    }

    #[test]
    fn gesture_starts_on_source_column() {
        let task = sample_task();
        let gesture = MoveGesture::pick_up(&task);
        assert_eq!(gesture.source, Status::Todo);
        assert_eq!(gesture.target, Status::Todo);
    }

    #[test]
    fn gesture_target_clamps_at_edges() {
        let task = sample_task();
        let mut gesture = MoveGesture::pick_up(&task);
        gesture.shift_target(-1);
        assert_eq!(gesture.target, Status::Todo); // already leftmost
        gesture.shift_target(1);
        assert_eq!(gesture.target, Status::InProgress);
        gesture.shift_target(1);
        gesture.shift_target(1);
        assert_eq!(gesture.target, Status::Completed); // clamped at right edge
    }
}
