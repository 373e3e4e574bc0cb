use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::app::{App, ListRow, Mode};
use crate::tui::theme::Theme;
use crate::util::unicode;
use crate::view::EditField;

const PRIORITY_COL: usize = 8;
const DUE_COL: usize = 11;
const ASSIGNEE_COL: usize = 16;

/// Render the grouped, filterable task table
pub fn render_task_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.list_rows();
    if rows.is_empty() {
        let empty = Paragraph::new("  no tasks match the current filters")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let start = scroll_start(app.tasks_cursor, height, rows.len());

    let mut lines: Vec<Line> = Vec::new();
    for (offset, row) in rows.iter().skip(start).take(height).enumerate() {
        let index = start + offset;
        let selected = index == app.tasks_cursor;
        match row {
            ListRow::Header {
                label,
                count,
                collapsed,
            } => lines.push(header_line(&app.theme, label, *count, *collapsed, selected, area.width)),
            ListRow::Task(task) => {
                lines.push(task_line(app, task, selected, area.width));
            }
        }
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}

/// First visible row index for a viewport of `height` rows
pub(super) fn scroll_start(cursor: usize, height: usize, len: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let max_start = len - height;
    cursor.saturating_sub(height.saturating_sub(1)).min(max_start)
}

fn header_line(
    theme: &Theme,
    label: &str,
    count: usize,
    collapsed: bool,
    selected: bool,
    width: u16,
) -> Line<'static> {
    let marker = if collapsed { "\u{25B8}" } else { "\u{25BE}" };
    let text = format!(" {} {} ({})", marker, label, count);
    let style = if selected {
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.highlight)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(
        unicode::fit_to_width(&text, width as usize),
        style,
    ))
}

/// One task row: status glyph, title (or the live edit buffer), priority,
/// due date, assignee.
fn task_line(app: &App, task: &Task, selected: bool, width: u16) -> Line<'static> {
    let theme = &app.theme;
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base_fg = if selected { theme.text_bright } else { theme.text };

    let status = theme.status_style(task.status);
    let priority = theme.priority_style(task.priority);

    let fixed = 3 + PRIORITY_COL + DUE_COL + ASSIGNEE_COL + 3;
    let title_width = (width as usize).saturating_sub(fixed).max(8);

    let editing = app.mode == Mode::Edit
        && app
            .edit
            .as_ref()
            .is_some_and(|e| e.task_id == task.id && e.field == EditField::Title);
    let title_cell = if editing {
        let session = app.edit.as_ref().map(|e| e.buffer.clone()).unwrap_or_default();
        unicode::fit_to_width(&format!("{}\u{258C}", session), title_width)
    } else {
        unicode::fit_to_width(&task.title, title_width)
    };

    let due_editing = app.mode == Mode::Edit
        && app
            .edit
            .as_ref()
            .is_some_and(|e| e.task_id == task.id && e.field == EditField::DueDate);
    let due_cell = if due_editing {
        let session = app.edit.as_ref().map(|e| e.buffer.clone()).unwrap_or_default();
        unicode::fit_to_width(&format!("{}\u{258C}", session), DUE_COL)
    } else {
        let due = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "\u{2014}".to_string());
        unicode::fit_to_width(&due, DUE_COL)
    };

    let overdue = task.due_date.is_some_and(|d| d < app.today())
        && task.status != crate::model::Status::Completed;
    let due_fg = if overdue { theme.red } else { base_fg };

    let title_style = if editing {
        Style::default().fg(theme.text_bright).bg(theme.selection_bg)
    } else {
        Style::default().fg(base_fg).bg(bg)
    };

    Line::from(vec![
        Span::styled(format!(" {} ", status.symbol), Style::default().fg(status.color).bg(bg)),
        Span::styled(title_cell, title_style),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            unicode::fit_to_width(priority.label, PRIORITY_COL),
            Style::default().fg(priority.color).bg(bg),
        ),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(due_cell, Style::default().fg(due_fg).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            unicode::fit_to_width(&task.assignee_name(), ASSIGNEE_COL),
            Style::default().fg(if task.assigned_to.is_some() { base_fg } else { theme.dim }).bg(bg),
        ),
    ])
}
