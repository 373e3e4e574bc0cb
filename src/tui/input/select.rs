use crate::api;
use crate::model::task::{Task, TaskWrite};
use crate::view::edit::{commit_assignee, commit_priority, commit_status};

use crate::tui::app::App;

use super::*;

/// Immediate-commit status change: cycle to the next status and save.
/// Selecting the value already shown would be a no-op, but cycling always
/// lands on a different value, so this always mutates.
pub(super) fn cycle_status(app: &mut App) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    let next = task.status.next();
    commit(app, &task, commit_status(&task, next), "changing status");
}

pub(super) fn cycle_priority(app: &mut App) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    let next = task.priority.next();
    commit(app, &task, commit_priority(&task, next), "changing priority");
}

/// Cycle assignee through unassigned → each project member in order.
pub(super) fn cycle_assignee(app: &mut App) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    if app.members.is_empty() {
        app.load_members(task.project);
    }
    if app.members.is_empty() {
        app.set_status("no members available for assignment");
        return;
    }
    let next = next_assignee(&task, &app.members.iter().map(|u| u.id).collect::<Vec<_>>());
    commit(app, &task, commit_assignee(&task, next), "changing assignee");
}

/// Unassigned → members[0] → members[1] → … → unassigned
fn next_assignee(task: &Task, member_ids: &[i64]) -> Option<i64> {
    match task.assigned_to {
        None => member_ids.first().copied(),
        Some(current) => {
            let idx = member_ids.iter().position(|id| *id == current);
            match idx {
                Some(i) if i + 1 < member_ids.len() => Some(member_ids[i + 1]),
                // Past the end (or assignee left the project): wrap to unassigned
                _ => None,
            }
        }
    }
}

/// Shared tail of every immediate-commit select: `None` means the value
/// was already current and no request is made; otherwise one full-task
/// update goes out and the collection reloads on success. On failure the
/// old value stays displayed — the control was never locally patched.
fn commit(app: &mut App, task: &Task, write: Option<TaskWrite>, context: &str) {
    let Some(write) = write else {
        return;
    };
    match api::tasks::update(&app.client, task.id, &write) {
        Ok(_) => app.reload_after_mutation(),
        Err(e) => app.handle_api_error(context, e),
    }
}
