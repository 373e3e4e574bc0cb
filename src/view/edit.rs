use chrono::NaiveDate;

use crate::model::task::{Priority, Status, Task, TaskWrite};

/// Which task field an inline edit session targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    DueDate,
}

impl EditField {
    pub fn label(self) -> &'static str {
        match self {
            EditField::Title => "title",
            EditField::Description => "description",
            EditField::DueDate => "due date",
        }
    }
}

/// Validation failures for inline edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid assignee '{0}'")]
    InvalidAssignee(String),
}

/// An inline edit in progress: one (task, field) pair, the candidate
/// buffer, and the pre-edit snapshot used for no-op detection.
///
/// Exists only while a single cell is in edit mode; dropped on save,
/// cancel, or focus loss.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub task_id: i64,
    pub field: EditField,
    /// Value at the moment editing began
    pub original: String,
    /// What the user has typed so far
    pub buffer: String,
    /// Byte offset of the cursor within `buffer`
    pub cursor: usize,
}

impl EditSession {
    /// Snapshot the current field value and enter edit mode.
    pub fn begin(task: &Task, field: EditField) -> Self {
        let original = match field {
            EditField::Title => task.title.clone(),
            EditField::Description => task.description.clone().unwrap_or_default(),
            EditField::DueDate => task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        };
        let cursor = original.len();
        EditSession {
            task_id: task.id,
            field,
            buffer: original.clone(),
            original,
            cursor,
        }
    }

    /// An unchanged buffer means saving is a silent no-op.
    pub fn is_noop(&self) -> bool {
        self.buffer == self.original
    }
}

/// What saving an inline edit should do.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Value unchanged: no network call, exit edit mode silently
    Unchanged,
    /// Send this full-task update, then reload on success
    Update(TaskWrite),
}

/// Resolve an edit session against the task it started from.
///
/// The no-op check runs before validation, so clearing and retyping the
/// identical value never produces an error or a request. A changed title
/// that is empty or whitespace-only is rejected; the caller keeps the
/// session (and the typed value) alive.
pub fn save_outcome(session: &EditSession, task: &Task) -> Result<SaveOutcome, EditError> {
    if session.is_noop() {
        return Ok(SaveOutcome::Unchanged);
    }
    let mut write = TaskWrite::from_task(task);
    match session.field {
        EditField::Title => {
            if session.buffer.trim().is_empty() {
                return Err(EditError::EmptyTitle);
            }
            write.title = session.buffer.clone();
        }
        EditField::Description => {
            write.description = if session.buffer.is_empty() {
                None
            } else {
                Some(session.buffer.clone())
            };
        }
        EditField::DueDate => {
            write.due_date = parse_due_date(&session.buffer)?;
        }
    }
    Ok(SaveOutcome::Update(write))
}

/// Empty clears the date; anything else must be YYYY-MM-DD.
fn parse_due_date(buffer: &str) -> Result<Option<NaiveDate>, EditError> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| EditError::InvalidDate(trimmed.to_string()))
}

// ---------------------------------------------------------------------------
// Immediate-commit selects (assignee / priority / status)
// ---------------------------------------------------------------------------

/// Wire sentinel for "no assignee" in select controls
pub const UNASSIGNED: &str = "unassigned";

/// Parse a select-control assignee value: the `"unassigned"` sentinel maps
/// to `None`; anything else must be an integer user id.
pub fn parse_assignee(value: &str) -> Result<Option<i64>, EditError> {
    if value == UNASSIGNED {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| EditError::InvalidAssignee(value.to_string()))
}

/// Selecting the value already shown is not a mutation.
pub fn commit_status(task: &Task, new: Status) -> Option<TaskWrite> {
    if task.status == new {
        return None;
    }
    let mut write = TaskWrite::from_task(task);
    write.status = new;
    Some(write)
}

pub fn commit_priority(task: &Task, new: Priority) -> Option<TaskWrite> {
    if task.priority == new {
        return None;
    }
    let mut write = TaskWrite::from_task(task);
    write.priority = new;
    Some(write)
}

pub fn commit_assignee(task: &Task, new: Option<i64>) -> Option<TaskWrite> {
    if task.assigned_to == new {
        return None;
    }
    let mut write = TaskWrite::from_task(task);
    write.assigned_to = new;
    Some(write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_task() -> Task {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Fix bug",
            "description": "crash on save",
            "project": 1,
            "assigned_to": 5,
            "priority": "high",
            "status": "todo",
            "due_date": "2024-11-20",
        }))
        .unwrap()
    }

    #[test]
    fn begin_snapshots_current_value() {
        let task = sample_task();
        let session = EditSession::begin(&task, EditField::Title);
        assert_eq!(session.original, "Fix bug");
        assert_eq!(session.buffer, "Fix bug");
        assert_eq!(session.cursor, "Fix bug".len());

        let session = EditSession::begin(&task, EditField::DueDate);
        assert_eq!(session.original, "2024-11-20");
    }

    #[test]
    fn unchanged_save_is_a_noop() {
        // Saving "Fix bug" over "Fix bug" performs no call.
        let task = sample_task();
        let session = EditSession::begin(&task, EditField::Title);
        assert_eq!(save_outcome(&session, &task).unwrap(), SaveOutcome::Unchanged);
    }

    #[test]
    fn empty_title_is_rejected() {
        let task = sample_task();
        let mut session = EditSession::begin(&task, EditField::Title);
        session.buffer = "   ".into();
        assert_eq!(save_outcome(&session, &task), Err(EditError::EmptyTitle));
    }

    #[test]
    fn changed_title_builds_full_update() {
        let task = sample_task();
        let mut session = EditSession::begin(&task, EditField::Title);
        session.buffer = "Fix crash on save".into();
        let outcome = save_outcome(&session, &task).unwrap();
        match outcome {
            SaveOutcome::Update(write) => {
                assert_eq!(write.title, "Fix crash on save");
                // All other fields carried over, not blanked
                assert_eq!(write.description.as_deref(), Some("crash on save"));
                assert_eq!(write.assigned_to, Some(5));
                assert_eq!(write.priority, Priority::High);
                assert_eq!(write.status, Status::Todo);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn clearing_description_sends_null() {
        let task = sample_task();
        let mut session = EditSession::begin(&task, EditField::Description);
        session.buffer.clear();
        match save_outcome(&session, &task).unwrap() {
            SaveOutcome::Update(write) => assert_eq!(write.description, None),
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn due_date_parses_or_rejects() {
        let task = sample_task();
        let mut session = EditSession::begin(&task, EditField::DueDate);
        session.buffer = "2024-12-01".into();
        match save_outcome(&session, &task).unwrap() {
            SaveOutcome::Update(write) => {
                assert_eq!(
                    write.due_date,
                    Some(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap())
                );
            }
            other => panic!("expected update, got {:?}", other),
        }

        session.buffer = "next tuesday".into();
        assert_eq!(
            save_outcome(&session, &task),
            Err(EditError::InvalidDate("next tuesday".into()))
        );

        // Clearing the buffer clears the date
        session.buffer = String::new();
        match save_outcome(&session, &task).unwrap() {
            SaveOutcome::Update(write) => assert_eq!(write.due_date, None),
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn assignee_sentinel_maps_to_none() {
        assert_eq!(parse_assignee(UNASSIGNED).unwrap(), None);
        assert_eq!(parse_assignee("12").unwrap(), Some(12));
        assert!(matches!(
            parse_assignee("bob"),
            Err(EditError::InvalidAssignee(_))
        ));
    }

    #[test]
    fn identical_select_commit_is_none() {
        let task = sample_task();
        assert!(commit_status(&task, Status::Todo).is_none());
        assert!(commit_priority(&task, Priority::High).is_none());
        assert!(commit_assignee(&task, Some(5)).is_none());
    }

    #[test]
    fn changed_select_commit_carries_other_fields() {
        let task = sample_task();
        let write = commit_status(&task, Status::InProgress).unwrap();
        assert_eq!(write.status, Status::InProgress);
        assert_eq!(write.title, "Fix bug");
        assert_eq!(write.assigned_to, Some(5));

        let write = commit_assignee(&task, None).unwrap();
        assert_eq!(write.assigned_to, None);
        assert_eq!(write.status, Status::Todo);
    }
}
