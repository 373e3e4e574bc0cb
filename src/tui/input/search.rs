use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ListRow, Mode, View};

use super::*;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            if !app.search_input.is_empty() {
                app.last_search = Some(app.search_input.clone());
            }
            app.search_input.clear();
            app.mode = Mode::Navigate;
            jump_to_match(app, 1);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}

/// Move the cursor to the next/previous row matching the last search.
/// Works over the flattened rows of the table and schedule views.
pub(super) fn jump_to_match(app: &mut App, direction: i32) {
    let Some(re) = app.active_search_re() else {
        return;
    };
    let (rows, cursor) = match app.view {
        View::Tasks => (app.list_rows(), app.tasks_cursor),
        View::Schedule => (app.schedule_rows(), app.schedule_cursor),
        _ => return,
    };
    if rows.is_empty() {
        return;
    }

    let len = rows.len() as i32;
    let mut idx = cursor as i32;
    for _ in 0..rows.len() {
        idx = (idx + direction).rem_euclid(len);
        if let Some(ListRow::Task(task)) = rows.get(idx as usize)
            && (re.is_match(&task.title)
                || task.description.as_deref().is_some_and(|d| re.is_match(d)))
        {
            match app.view {
                View::Tasks => app.tasks_cursor = idx as usize,
                View::Schedule => app.schedule_cursor = idx as usize,
                _ => {}
            }
            return;
        }
    }
    app.set_status("no matches");
}
