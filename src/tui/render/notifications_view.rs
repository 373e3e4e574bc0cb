use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::task_table::scroll_start;

/// Render the notification center
pub fn render_notifications(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.notifications.is_empty() {
        let empty = Paragraph::new("  no notifications")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let start = scroll_start(app.notif_cursor, height, app.notifications.len());
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (offset, notification) in app.notifications.iter().skip(start).take(height).enumerate() {
        let index = start + offset;
        let selected = index == app.notif_cursor;
        let theme = &app.theme;
        let bg = if selected { theme.selection_bg } else { theme.background };
        let entry = theme.notification_style(notification.kind);

        let dot = if notification.is_read { " " } else { "\u{25CF}" };
        let message_style = if notification.is_read {
            Style::default().fg(theme.dim).bg(bg)
        } else {
            Style::default()
                .fg(if selected { theme.text_bright } else { theme.text })
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        };
        let when = notification
            .created_at
            .map(|t| t.format("%b %d %H:%M").to_string())
            .unwrap_or_default();

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", dot),
                Style::default().fg(theme.highlight).bg(bg),
            ),
            Span::styled(
                format!("{} ", entry.symbol),
                Style::default().fg(entry.color).bg(bg),
            ),
            Span::styled(
                unicode::fit_to_width(&notification.message, width.saturating_sub(22).max(10)),
                message_style,
            ),
            Span::styled(
                format!(" {}", when),
                Style::default().fg(theme.dim).bg(bg),
            ),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}
