use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const HELP: &[(&str, &str)] = &[
    ("Tab / 1-5", "switch view"),
    ("j/k", "move cursor"),
    ("h/l", "board column"),
    ("Enter", "open task / toggle group"),
    ("z", "collapse group"),
    ("e", "edit title"),
    ("d", "edit due date"),
    ("D", "edit description (detail)"),
    ("s / p / a", "cycle status / priority / assignee"),
    ("m / Space", "pick up board task"),
    ("c", "create task / write comment"),
    ("R", "reply to comment"),
    ("x", "delete"),
    ("f / y / w / A", "filter status / priority / due / assignee"),
    ("F", "clear filters"),
    ("o / O", "sort key / direction"),
    ("G", "group by"),
    ("/", "search, then n/N to cycle"),
    ("r", "reload from server"),
    ("q", "quit"),
];

/// Render the key-binding overlay centered on the screen
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let height = (HELP.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 46.min(area.width.saturating_sub(2));
    let popup = Rect::new(
        (area.width.saturating_sub(width)) / 2,
        (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<12}", key),
                    Style::default()
                        .fg(theme.highlight)
                        .bg(theme.background)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    (*action).to_string(),
                    Style::default().fg(theme.text).bg(theme.background),
                ),
            ])
        })
        .collect();

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .title(" keys ")
        .style(Style::default().bg(theme.background));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
