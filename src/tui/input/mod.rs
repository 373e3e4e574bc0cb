mod board;
mod comment;
mod controls;
mod edit;
mod navigate;
mod search;
mod select;

use crossterm::event::KeyEvent;

use super::app::{App, Mode};

#[allow(unused_imports)]
use board::*;
#[allow(unused_imports)]
use comment::*;
#[allow(unused_imports)]
use controls::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;
#[allow(unused_imports)]
use select::*;

pub use edit::{delete_backward, insert_char, move_cursor_left, move_cursor_right};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Any keypress consumes the transient status message
    if app.mode == Mode::Navigate {
        app.status_message = None;
    }

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Edit => edit::handle_edit(app, key),
        Mode::Search => search::handle_search(app, key),
        Mode::Move => board::handle_move(app, key),
        Mode::Comment => comment::handle_comment(app, key),
    }
}
