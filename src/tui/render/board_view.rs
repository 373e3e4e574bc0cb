use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::task::Task;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::task_table::scroll_start;

/// Render the kanban board: one bordered column per status
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = app.board_columns();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            columns
                .iter()
                .map(|_| Constraint::Ratio(1, columns.len() as u32))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (idx, ((status, tasks), chunk)) in columns.iter().zip(chunks.iter()).enumerate() {
        render_column(frame, app, *chunk, idx, app.theme.status_style(*status).label, tasks);
    }
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    column_idx: usize,
    label: &str,
    tasks: &[Task],
) {
    let theme = &app.theme;
    let is_current = column_idx == app.board_column;
    let is_drop_target = app.mode == Mode::Move
        && app
            .move_gesture
            .as_ref()
            .is_some_and(|g| crate::view::COLUMNS.get(column_idx) == Some(&g.target));

    let border_color = if is_drop_target {
        theme.highlight
    } else if is_current {
        theme.text_bright
    } else {
        theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(theme.background))
        .title(format!(" {} ({}) ", label, tasks.len()))
        .title_style(
            Style::default()
                .fg(if is_current { theme.text_bright } else { theme.dim })
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Two rows per card plus a blank spacer
    let card_height = 3;
    let visible_cards = (inner.height as usize / card_height).max(1);
    let cursor = if is_current { app.board_cursor } else { 0 };
    let start = scroll_start(cursor, visible_cards, tasks.len());

    let mut lines: Vec<Line> = Vec::new();
    for (offset, task) in tasks.iter().skip(start).take(visible_cards).enumerate() {
        let index = start + offset;
        let selected = is_current && index == app.board_cursor;
        let held = app
            .move_gesture
            .as_ref()
            .is_some_and(|g| g.task_id == task.id);
        lines.extend(card_lines(app, task, selected, held, inner.width));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        inner,
    );
}

fn card_lines(app: &App, task: &Task, selected: bool, held: bool, width: u16) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let bg = if selected || held {
        theme.selection_bg
    } else {
        theme.background
    };
    let fg = if selected || held {
        theme.text_bright
    } else {
        theme.text
    };
    let width = width as usize;

    let marker = if held { "\u{2947} " } else { "  " };
    let title = unicode::fit_to_width(
        &format!("{}{}", marker, task.title),
        width,
    );

    let priority = theme.priority_style(task.priority);
    let due = task
        .due_date
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_default();
    let meta = unicode::fit_to_width(
        &format!("  {} {}  {}", priority.symbol, priority.label, due),
        width,
    );

    vec![
        Line::from(Span::styled(title, Style::default().fg(fg).bg(bg))),
        Line::from(Span::styled(meta, Style::default().fg(priority.color).bg(bg))),
        Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(theme.background),
        )),
    ]
}
