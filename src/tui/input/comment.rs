use crossterm::event::{KeyCode, KeyEvent};

use crate::api;
use crate::tui::app::{App, Mode, View};
use crate::view::mention::{apply_mention, filter_members, mention_at_cursor};

use super::*;

/// Focus the comment composer. `reply_to` threads the new comment under
/// an existing top-level comment.
pub(super) fn begin_comment(app: &mut App, reply_to: Option<i64>) {
    app.comment_input.clear();
    app.comment_cursor = 0;
    app.reply_to = reply_to;
    app.mention_selected = 0;
    app.mode = Mode::Comment;
}

pub(super) fn handle_comment(app: &mut App, key: KeyEvent) {
    let suggestions = mention_suggestion_count(app);

    match key.code {
        KeyCode::Esc => {
            app.comment_input.clear();
            app.comment_cursor = 0;
            app.reply_to = None;
            app.mode = Mode::Navigate;
        }
        // With the mention dropdown open, Up/Down pick a suggestion and
        // Tab accepts it
        KeyCode::Down if suggestions > 0 => {
            app.mention_selected = (app.mention_selected + 1) % suggestions;
        }
        KeyCode::Up if suggestions > 0 => {
            app.mention_selected = app
                .mention_selected
                .checked_sub(1)
                .unwrap_or(suggestions - 1);
        }
        KeyCode::Tab if suggestions > 0 => accept_mention(app),
        KeyCode::Enter if suggestions > 0 => accept_mention(app),
        KeyCode::Enter => submit_comment(app),
        KeyCode::Backspace => {
            delete_backward(&mut app.comment_input, &mut app.comment_cursor);
            app.mention_selected = 0;
        }
        KeyCode::Left => move_cursor_left(&app.comment_input, &mut app.comment_cursor),
        KeyCode::Right => move_cursor_right(&app.comment_input, &mut app.comment_cursor),
        KeyCode::Char(c) => {
            insert_char(&mut app.comment_input, &mut app.comment_cursor, c);
            app.mention_selected = 0;
        }
        _ => {}
    }
}

/// How many member suggestions the active mention query matches
pub(super) fn mention_suggestion_count(app: &App) -> usize {
    match mention_at_cursor(&app.comment_input, app.comment_cursor) {
        Some(query) => filter_members(&app.members, &query.query).len(),
        None => 0,
    }
}

fn accept_mention(app: &mut App) {
    let Some(query) = mention_at_cursor(&app.comment_input, app.comment_cursor) else {
        return;
    };
    let matches = filter_members(&app.members, &query.query);
    let Some(member) = matches.get(app.mention_selected.min(matches.len().saturating_sub(1)))
    else {
        return;
    };
    let username = member.username.clone();
    let (text, cursor) = apply_mention(&app.comment_input, app.comment_cursor, &query, &username);
    app.comment_input = text;
    app.comment_cursor = cursor;
    app.mention_selected = 0;
}

fn submit_comment(app: &mut App) {
    let View::Detail { task_id } = app.view else {
        app.mode = Mode::Navigate;
        return;
    };
    let content = app.comment_input.trim().to_string();
    if content.is_empty() {
        app.mode = Mode::Navigate;
        return;
    }
    match api::comments::create(&app.client, task_id, &content, app.reply_to) {
        Ok(_) => {
            app.comment_input.clear();
            app.comment_cursor = 0;
            app.reply_to = None;
            app.mode = Mode::Navigate;
            app.reload_comments(task_id);
        }
        Err(e) => {
            // Keep the composer open with the typed text
            app.handle_api_error("posting comment", e);
        }
    }
}
