pub mod board_view;
pub mod detail_view;
pub mod help_overlay;
pub mod mention_popup;
pub mod notifications_view;
pub mod projects_view;
pub mod schedule_view;
pub mod status_row;
pub mod tab_bar;
pub mod task_table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, View};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    let view = app.view.clone();
    match &view {
        View::Tasks => task_table::render_task_table(frame, app, chunks[1]),
        View::Board => board_view::render_board(frame, app, chunks[1]),
        View::Schedule => schedule_view::render_schedule(frame, app, chunks[1]),
        View::Projects => projects_view::render_projects(frame, app, chunks[1]),
        View::Notifications => notifications_view::render_notifications(frame, app, chunks[1]),
        View::Detail { task_id } => detail_view::render_detail(frame, app, chunks[1], *task_id),
    }

    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays on top of everything
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}
