use crossterm::event::{KeyCode, KeyEvent};

use crate::api;
use crate::tui::app::{App, Mode};
use crate::view::board::{COLUMNS, MoveGesture, drop_update};

use super::*;

/// Pick up the task under the board cursor. This is the deliberate
/// activation step: until a task is held, no amount of cursor movement
/// can mutate anything.
pub(super) fn pick_up(app: &mut App) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    app.move_gesture = Some(MoveGesture::pick_up(&task));
    app.mode = Mode::Move;
}

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let Some(mut gesture) = app.move_gesture.take() else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            // Released outside any column: nothing happens
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            gesture.shift_target(-1);
            app.move_gesture = Some(gesture);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            gesture.shift_target(1);
            app.move_gesture = Some(gesture);
        }
        KeyCode::Enter | KeyCode::Char(' ') => drop_task(app, gesture),
        _ => {
            app.move_gesture = Some(gesture);
        }
    }
}

/// Resolve the drop. Same-column drops make no request; a cross-column
/// drop sends one full update with only `status` changed. On failure the
/// board re-renders from the pre-mutation server state on the next
/// reload — there is no local change to roll back.
fn drop_task(app: &mut App, gesture: MoveGesture) {
    app.mode = Mode::Navigate;
    let Some(task) = app.find_task(gesture.task_id) else {
        return;
    };
    let Some(write) = drop_update(&task, Some(gesture.target)) else {
        return; // dropped on its own column
    };
    match api::tasks::update(&app.client, task.id, &write) {
        Ok(_) => {
            app.reload_after_mutation();
            // Follow the task to its new column
            if let Some(idx) = COLUMNS.iter().position(|c| *c == gesture.target) {
                app.board_column = idx;
            }
            app.clamp_cursors();
        }
        Err(e) => app.handle_api_error("moving task", e),
    }
}
