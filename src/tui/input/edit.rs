use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api;
use crate::model::task::{Priority, Status, TaskWrite};
use crate::tui::app::{App, CreateSession, Mode};
use crate::util::unicode;
use crate::view::{EditField, EditSession, SaveOutcome, save_outcome};

use super::*;

// ---------------------------------------------------------------------------
// Shared single-line buffer editing
// ---------------------------------------------------------------------------

pub fn insert_char(buffer: &mut String, cursor: &mut usize, c: char) {
    buffer.insert(*cursor, c);
    *cursor += c.len_utf8();
}

pub fn delete_backward(buffer: &mut String, cursor: &mut usize) {
    if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
        buffer.drain(prev..*cursor);
        *cursor = prev;
    }
}

pub fn delete_forward(buffer: &mut String, cursor: usize) {
    if let Some(next) = unicode::next_grapheme_boundary(buffer, cursor) {
        buffer.drain(cursor..next);
    } else if cursor < buffer.len() {
        buffer.truncate(cursor);
    }
}

pub fn move_cursor_left(buffer: &str, cursor: &mut usize) {
    if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
        *cursor = prev;
    }
}

pub fn move_cursor_right(buffer: &str, cursor: &mut usize) {
    if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
        *cursor = next;
    }
}

/// Apply one key to a single-line buffer. Returns false for keys the
/// buffer does not consume (Enter, Esc, view-level keys).
fn apply_buffer_key(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            insert_char(buffer, cursor, c);
            true
        }
        KeyCode::Backspace => {
            delete_backward(buffer, cursor);
            true
        }
        KeyCode::Delete => {
            delete_forward(buffer, *cursor);
            true
        }
        KeyCode::Left => {
            move_cursor_left(buffer, cursor);
            true
        }
        KeyCode::Right => {
            move_cursor_right(buffer, cursor);
            true
        }
        KeyCode::Home => {
            *cursor = 0;
            true
        }
        KeyCode::End => {
            *cursor = buffer.len();
            true
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.drain(..*cursor);
            *cursor = 0;
            true
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Inline field edit
// ---------------------------------------------------------------------------

/// Snapshot the field under the cursor and enter edit mode
pub(super) fn enter_edit(app: &mut App, field: EditField) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    app.edit = Some(EditSession::begin(&task, field));
    app.mode = Mode::Edit;
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    if app.create.is_some() {
        handle_create(app, key);
        return;
    }

    let Some(mut session) = app.edit.take() else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            // Cancel: discard the buffer, nothing is sent
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => save_edit(app, session),
        _ => {
            apply_buffer_key(&mut session.buffer, &mut session.cursor, key);
            app.edit = Some(session);
        }
    }
}

/// Resolve a save. An unchanged buffer exits silently with zero network
/// calls; a validation failure keeps edit mode (and the typed value)
/// alive; a real change sends the full task and reloads on success.
fn save_edit(app: &mut App, session: EditSession) {
    let Some(task) = app.find_task(session.task_id) else {
        app.mode = Mode::Navigate;
        return;
    };
    match save_outcome(&session, &task) {
        Ok(SaveOutcome::Unchanged) => {
            app.mode = Mode::Navigate;
        }
        Ok(SaveOutcome::Update(write)) => match api::tasks::update(&app.client, task.id, &write) {
            Ok(_) => {
                app.mode = Mode::Navigate;
                app.reload_after_mutation();
            }
            Err(e) => {
                // Stay in edit mode with the user's value preserved
                app.handle_api_error("saving task", e);
                app.edit = Some(session);
            }
        },
        Err(validation) => {
            app.set_status(validation.to_string());
            app.edit = Some(session);
        }
    }
}

// ---------------------------------------------------------------------------
// Quick create
// ---------------------------------------------------------------------------

/// Start typing a new task title. The project comes from the task under
/// the cursor, falling back to the first visible project.
pub(super) fn begin_create(app: &mut App) {
    let project = app
        .cursor_task()
        .map(|t| t.project)
        .or_else(|| app.projects.first().map(|p| p.id));
    let Some(project) = project else {
        app.set_status("no project to create a task in");
        return;
    };
    app.create = Some(CreateSession {
        project,
        buffer: String::new(),
        cursor: 0,
    });
    app.mode = Mode::Edit;
}

fn handle_create(app: &mut App, key: KeyEvent) {
    let Some(mut session) = app.create.take() else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            if session.buffer.trim().is_empty() {
                app.set_status("title cannot be empty");
                app.create = Some(session);
                return;
            }
            let write = TaskWrite {
                title: session.buffer.clone(),
                description: None,
                project: session.project,
                assigned_to: None,
                priority: Priority::Medium,
                status: Status::Todo,
                due_date: None,
            };
            match api::tasks::create(&app.client, &write) {
                Ok(task) => {
                    app.mode = Mode::Navigate;
                    app.set_status(format!("created '{}'", task.title));
                    app.reload_after_mutation();
                }
                Err(e) => {
                    app.handle_api_error("creating task", e);
                    app.create = Some(session);
                }
            }
        }
        _ => {
            apply_buffer_key(&mut session.buffer, &mut session.cursor, key);
            app.create = Some(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_round_trip() {
        let mut buffer = String::from("ab");
        let mut cursor = 1;
        insert_char(&mut buffer, &mut cursor, 'x');
        assert_eq!(buffer, "axb");
        assert_eq!(cursor, 2);
        delete_backward(&mut buffer, &mut cursor);
        assert_eq!(buffer, "ab");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut buffer = String::from("a🎉");
        let mut cursor = buffer.len();
        delete_backward(&mut buffer, &mut cursor);
        assert_eq!(buffer, "a");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn cursor_moves_respect_utf8() {
        let buffer = String::from("a你b");
        let mut cursor = 0;
        move_cursor_right(&buffer, &mut cursor);
        assert_eq!(cursor, 1);
        move_cursor_right(&buffer, &mut cursor);
        assert_eq!(cursor, 4); // past the 3-byte char
        move_cursor_left(&buffer, &mut cursor);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn delete_forward_at_end_is_noop() {
        let mut buffer = String::from("ab");
        delete_forward(&mut buffer, 2);
        assert_eq!(buffer, "ab");
        delete_forward(&mut buffer, 0);
        assert_eq!(buffer, "b");
    }
}
