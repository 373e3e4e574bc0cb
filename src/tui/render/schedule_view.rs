use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ListRow};
use crate::util::unicode;

use super::task_table::scroll_start;

/// Render the date-bucketed "My Tasks" list. Buckets with no tasks are
/// not rendered at all (the view-model already omits them).
pub fn render_schedule(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.schedule_rows();
    if rows.is_empty() {
        let empty = Paragraph::new("  nothing assigned to you")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let start = scroll_start(app.schedule_cursor, height, rows.len());
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (offset, row) in rows.iter().skip(start).take(height).enumerate() {
        let index = start + offset;
        let selected = index == app.schedule_cursor;
        let theme = &app.theme;
        match row {
            ListRow::Header {
                label,
                count,
                collapsed,
            } => {
                let marker = if *collapsed { "\u{25B8}" } else { "\u{25BE}" };
                let overdue_bucket = label == "Past Dates";
                let fg = if overdue_bucket { theme.red } else { theme.highlight };
                let style = if selected {
                    Style::default()
                        .fg(theme.text_bright)
                        .bg(theme.selection_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(fg).bg(theme.background).add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(Span::styled(
                    unicode::fit_to_width(&format!(" {} {} ({})", marker, label, count), width),
                    style,
                )));
            }
            ListRow::Task(task) => {
                let bg = if selected { theme.selection_bg } else { theme.background };
                let fg = if selected { theme.text_bright } else { theme.text };
                let status = theme.status_style(task.status);
                let priority = theme.priority_style(task.priority);
                let due = task
                    .due_date
                    .map(|d| d.format("%a %b %d").to_string())
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("   {} ", status.symbol),
                        Style::default().fg(status.color).bg(bg),
                    ),
                    Span::styled(
                        unicode::fit_to_width(&task.title, width.saturating_sub(26).max(8)),
                        Style::default().fg(fg).bg(bg),
                    ),
                    Span::styled(" ", Style::default().bg(bg)),
                    Span::styled(
                        format!("{} ", priority.symbol),
                        Style::default().fg(priority.color).bg(bg),
                    ),
                    Span::styled(
                        unicode::fit_to_width(&due, 12),
                        Style::default().fg(theme.dim).bg(bg),
                    ),
                ]));
            }
        }
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}
