use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::task_table::scroll_start;

const COUNT_COL: usize = 8;
const BAR_WIDTH: usize = 20;

/// Render the project list with server-computed completion bars
pub fn render_projects(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.projects.is_empty() {
        let empty = Paragraph::new("  no projects")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let start = scroll_start(app.projects_cursor, height, app.projects.len());
    let width = area.width as usize;
    let title_width = width.saturating_sub(COUNT_COL + BAR_WIDTH + 12).max(10);

    let mut lines: Vec<Line> = Vec::new();
    for (offset, project) in app.projects.iter().skip(start).take(height).enumerate() {
        let index = start + offset;
        let selected = index == app.projects_cursor;
        let theme = &app.theme;
        let bg = if selected { theme.selection_bg } else { theme.background };
        let fg = if selected { theme.text_bright } else { theme.text };

        let pct = project.completion_percentage.clamp(0.0, 100.0);
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "\u{2588}".repeat(filled),
            "\u{2591}".repeat(BAR_WIDTH - filled)
        );

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", unicode::fit_to_width(&project.title, title_width)),
                Style::default().fg(fg).bg(bg),
            ),
            Span::styled(
                unicode::fit_to_width(&format!("{} tasks", project.task_count), COUNT_COL + 6),
                Style::default().fg(theme.dim).bg(bg),
            ),
            Span::styled(bar, Style::default().fg(theme.green).bg(bg)),
            Span::styled(
                format!(" {:>3.0}% ", pct),
                Style::default().fg(theme.dim).bg(bg),
            ),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}
