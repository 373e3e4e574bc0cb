use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::task::Task;

/// Which column the task list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    DueDate,
    Priority,
    Status,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::DueDate => "Due Date",
            SortKey::Priority => "Priority",
            SortKey::Status => "Status",
        }
    }

    /// Cycle through sort keys (for the sort control)
    pub fn next(self) -> SortKey {
        match self {
            SortKey::Title => SortKey::DueDate,
            SortKey::DueDate => SortKey::Priority,
            SortKey::Priority => SortKey::Status,
            SortKey::Status => SortKey::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggle(self) -> SortDir {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDir::Asc => "\u{2191}",
            SortDir::Desc => "\u{2193}",
        }
    }
}

/// Natural (ascending) comparison for a sort key.
///
/// Missing due dates compare as the epoch, i.e. they sort earliest — a
/// deliberate choice pinned by tests, not an accident. Priority's natural
/// order puts high first: the direction flips this whole comparison, never
/// the rank table.
fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::DueDate => {
            let a_due = a.due_date.unwrap_or(NaiveDate::default());
            let b_due = b.due_date.unwrap_or(NaiveDate::default());
            a_due.cmp(&b_due)
        }
        SortKey::Priority => b.priority.rank().cmp(&a.priority.rank()),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
    }
}

/// Stable in-place sort by the given key and direction.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey, dir: SortDir) {
    tasks.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}
