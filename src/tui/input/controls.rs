use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::{Priority, Status};
use crate::tui::app::App;
use crate::view::{AssigneeFilter, DueFilter};

use super::*;

/// Filter/sort/group keys shared by the table and board views
pub(super) fn handle_control_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('f') => {
            app.filters.status = cycle_option(app.filters.status, &Status::ALL);
            app.clamp_cursors();
        }
        KeyCode::Char('y') => {
            app.filters.priority = cycle_option(app.filters.priority, &[
                Priority::High,
                Priority::Medium,
                Priority::Low,
            ]);
            app.clamp_cursors();
        }
        KeyCode::Char('w') => {
            app.filters.due = match app.filters.due {
                DueFilter::All => DueFilter::Overdue,
                DueFilter::Overdue => DueFilter::Today,
                DueFilter::Today => DueFilter::ThisWeek,
                DueFilter::ThisWeek => DueFilter::All,
            };
            app.clamp_cursors();
        }
        KeyCode::Char('A') => {
            app.filters.assignee = cycle_assignee_filter(app);
            app.clamp_cursors();
        }
        KeyCode::Char('F') => {
            app.filters.reset();
            app.clamp_cursors();
            app.set_status("filters cleared");
        }
        KeyCode::Char('o') => {
            app.sort_key = app.sort_key.next();
        }
        KeyCode::Char('O') => {
            app.sort_dir = app.sort_dir.toggle();
        }
        KeyCode::Char('G') => {
            app.group_key = app.group_key.next();
            // Collapse state is keyed by label; labels change with the key
            app.collapsed.clear();
            app.clamp_cursors();
        }
        _ => {}
    }
}

/// all → first → … → last → all
fn cycle_option<T: Copy + PartialEq>(current: Option<T>, values: &[T]) -> Option<T> {
    match current {
        None => values.first().copied(),
        Some(v) => {
            let idx = values.iter().position(|x| *x == v);
            match idx {
                Some(i) if i + 1 < values.len() => Some(values[i + 1]),
                _ => None,
            }
        }
    }
}

/// all → unassigned → each assignee present in the loaded tasks → all
fn cycle_assignee_filter(app: &App) -> AssigneeFilter {
    let mut ids: Vec<i64> = Vec::new();
    for task in &app.tasks {
        if let Some(id) = task.assigned_to
            && !ids.contains(&id)
        {
            ids.push(id);
        }
    }
    match app.filters.assignee {
        AssigneeFilter::All => AssigneeFilter::Unassigned,
        AssigneeFilter::Unassigned => match ids.first() {
            Some(id) => AssigneeFilter::User(*id),
            None => AssigneeFilter::All,
        },
        AssigneeFilter::User(current) => {
            let idx = ids.iter().position(|id| *id == current);
            match idx {
                Some(i) if i + 1 < ids.len() => AssigneeFilter::User(ids[i + 1]),
                _ => AssigneeFilter::All,
            }
        }
    }
}
