use crossterm::event::{KeyCode, KeyEvent};

use crate::api;
use crate::tui::app::{App, ListRow, Mode, View};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay swallows everything except its dismiss keys
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Tab => {
            switch_view(app, 1);
            return;
        }
        KeyCode::BackTab => {
            switch_view(app, -1);
            return;
        }
        KeyCode::Char('1') => return jump_view(app, View::Tasks),
        KeyCode::Char('2') => return jump_view(app, View::Board),
        KeyCode::Char('3') => return jump_view(app, View::Schedule),
        KeyCode::Char('4') => return jump_view(app, View::Projects),
        KeyCode::Char('5') => return jump_view(app, View::Notifications),
        KeyCode::Char('r') => {
            app.load_all();
            app.clamp_cursors();
            app.set_status("reloaded");
            return;
        }
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.search_input.clear();
            return;
        }
        _ => {}
    }

    match app.view.clone() {
        View::Tasks => handle_tasks_view(app, key),
        View::Board => handle_board_view(app, key),
        View::Schedule => handle_schedule_view(app, key),
        View::Projects => handle_projects_view(app, key),
        View::Notifications => handle_notifications_view(app, key),
        View::Detail { task_id } => handle_detail_view(app, key, task_id),
    }
}

/// Tab order of the top-level views
const VIEW_ORDER: [View; 5] = [
    View::Tasks,
    View::Board,
    View::Schedule,
    View::Projects,
    View::Notifications,
];

fn switch_view(app: &mut App, delta: i32) {
    let current = match &app.view {
        View::Detail { .. } => 0,
        view => VIEW_ORDER.iter().position(|v| v == view).unwrap_or(0) as i32,
    };
    let count = VIEW_ORDER.len() as i32;
    let next = (current + delta).rem_euclid(count) as usize;
    jump_view(app, VIEW_ORDER[next].clone());
}

fn jump_view(app: &mut App, view: View) {
    if let View::Notifications = view {
        // Opening the notification center refreshes the list eagerly
        app.reload_notifications();
        app.clamp_cursors();
    }
    app.view = view;
}

/// Open a task's detail view, loading its comments and project members
pub(super) fn open_detail(app: &mut App, task_id: i64) {
    if let Some(task) = app.find_task(task_id) {
        app.load_members(task.project);
    }
    app.reload_comments(task_id);
    app.detail_comment_cursor = 0;
    app.view = View::Detail { task_id };
}

fn handle_tasks_view(app: &mut App, key: KeyEvent) {
    let rows = app.list_rows();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.tasks_cursor = step(app.tasks_cursor, 1, rows.len());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tasks_cursor = step(app.tasks_cursor, -1, rows.len());
        }
        KeyCode::Enter => match rows.get(app.tasks_cursor) {
            Some(ListRow::Header { label, .. }) => toggle_collapse(app, label.clone()),
            Some(ListRow::Task(task)) => open_detail(app, task.id),
            None => {}
        },
        KeyCode::Char('z') => {
            if let Some(ListRow::Header { label, .. }) = rows.get(app.tasks_cursor) {
                toggle_collapse(app, label.clone());
            }
        }
        KeyCode::Char('e') => enter_edit(app, crate::view::EditField::Title),
        KeyCode::Char('d') => enter_edit(app, crate::view::EditField::DueDate),
        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('p') => cycle_priority(app),
        KeyCode::Char('a') => cycle_assignee(app),
        KeyCode::Char('x') => delete_task(app),
        KeyCode::Char('c') => begin_create(app),
        KeyCode::Char('n') => jump_to_match(app, 1),
        KeyCode::Char('N') => jump_to_match(app, -1),
        _ => handle_control_keys(app, key),
    }
}

fn handle_board_view(app: &mut App, key: KeyEvent) {
    let columns = app.board_columns();
    let column_len = columns.get(app.board_column).map_or(0, |(_, t)| t.len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.board_cursor = step(app.board_cursor, 1, column_len);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.board_cursor = step(app.board_cursor, -1, column_len);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.board_column = step(app.board_column, -1, columns.len());
            app.clamp_cursors();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.board_column = step(app.board_column, 1, columns.len());
            app.clamp_cursors();
        }
        KeyCode::Char('m') | KeyCode::Char(' ') => pick_up(app),
        KeyCode::Enter => {
            if let Some(task) = app.cursor_task() {
                open_detail(app, task.id);
            }
        }
        KeyCode::Char('e') => enter_edit(app, crate::view::EditField::Title),
        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('p') => cycle_priority(app),
        KeyCode::Char('a') => cycle_assignee(app),
        KeyCode::Char('x') => delete_task(app),
        _ => handle_control_keys(app, key),
    }
}

fn handle_schedule_view(app: &mut App, key: KeyEvent) {
    let rows = app.schedule_rows();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.schedule_cursor = step(app.schedule_cursor, 1, rows.len());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.schedule_cursor = step(app.schedule_cursor, -1, rows.len());
        }
        KeyCode::Enter => match rows.get(app.schedule_cursor) {
            Some(ListRow::Header { label, .. }) => toggle_collapse(app, label.clone()),
            Some(ListRow::Task(task)) => open_detail(app, task.id),
            None => {}
        },
        KeyCode::Char('z') => {
            if let Some(ListRow::Header { label, .. }) = rows.get(app.schedule_cursor) {
                toggle_collapse(app, label.clone());
            }
        }
        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('p') => cycle_priority(app),
        _ => {}
    }
}

fn handle_projects_view(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.projects_cursor = step(app.projects_cursor, 1, app.projects.len());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.projects_cursor = step(app.projects_cursor, -1, app.projects.len());
        }
        _ => {}
    }
}

fn handle_notifications_view(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.notif_cursor = step(app.notif_cursor, 1, app.notifications.len());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.notif_cursor = step(app.notif_cursor, -1, app.notifications.len());
        }
        KeyCode::Enter => mark_notification_read(app),
        KeyCode::Char('M') => mark_all_notifications_read(app),
        KeyCode::Char('x') => delete_notification(app),
        _ => {}
    }
}

fn handle_detail_view(app: &mut App, key: KeyEvent, task_id: i64) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            app.detail_comments.clear();
            app.view = View::Tasks;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.detail_comment_cursor =
                step(app.detail_comment_cursor, 1, app.detail_comments.len());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.detail_comment_cursor =
                step(app.detail_comment_cursor, -1, app.detail_comments.len());
        }
        KeyCode::Char('e') => enter_edit(app, crate::view::EditField::Title),
        KeyCode::Char('D') => enter_edit(app, crate::view::EditField::Description),
        KeyCode::Char('d') => enter_edit(app, crate::view::EditField::DueDate),
        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('p') => cycle_priority(app),
        KeyCode::Char('a') => cycle_assignee(app),
        KeyCode::Char('c') => begin_comment(app, None),
        KeyCode::Char('R') => {
            let parent = app
                .detail_comments
                .get(app.detail_comment_cursor)
                // Replies attach to the thread root, never to another reply
                .map(|c| c.parent.unwrap_or(c.id));
            begin_comment(app, parent);
        }
        KeyCode::Char('x') => delete_comment(app, task_id),
        _ => {}
    }
}

/// Move a cursor by one step, clamped to the list bounds
pub(super) fn step(cursor: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = cursor as i32 + delta;
    next.clamp(0, len as i32 - 1) as usize
}

fn toggle_collapse(app: &mut App, label: String) {
    if !app.collapsed.remove(&label) {
        app.collapsed.insert(label);
    }
}

// ---------------------------------------------------------------------------
// Mutations dispatched from navigate mode
// ---------------------------------------------------------------------------

fn delete_task(app: &mut App) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    match api::tasks::delete(&app.client, task.id) {
        Ok(()) => {
            app.set_status(format!("deleted '{}'", task.title));
            app.reload_after_mutation();
        }
        Err(e) => app.handle_api_error("deleting task", e),
    }
}

fn mark_notification_read(app: &mut App) {
    let Some(notification) = app.notifications.get(app.notif_cursor).cloned() else {
        return;
    };
    if notification.is_read {
        return;
    }
    match api::notifications::mark_read(&app.client, notification.id) {
        Ok(()) => {
            app.reload_notifications();
            app.refresh_unread(true);
        }
        Err(e) => app.handle_api_error("marking notification read", e),
    }
}

fn mark_all_notifications_read(app: &mut App) {
    match api::notifications::mark_all_read(&app.client) {
        Ok(()) => {
            app.reload_notifications();
            app.refresh_unread(true);
            app.set_status("all notifications read");
        }
        Err(e) => app.handle_api_error("marking notifications read", e),
    }
}

fn delete_notification(app: &mut App) {
    let Some(notification) = app.notifications.get(app.notif_cursor).cloned() else {
        return;
    };
    match api::notifications::delete(&app.client, notification.id) {
        Ok(()) => {
            app.reload_notifications();
            app.refresh_unread(true);
            app.clamp_cursors();
        }
        Err(e) => app.handle_api_error("deleting notification", e),
    }
}

fn delete_comment(app: &mut App, task_id: i64) {
    let Some(comment) = app.detail_comments.get(app.detail_comment_cursor).cloned() else {
        return;
    };
    match api::comments::delete(&app.client, comment.id) {
        Ok(()) => {
            app.reload_comments(task_id);
            app.clamp_cursors();
        }
        Err(e) => app.handle_api_error("deleting comment", e),
    }
}
