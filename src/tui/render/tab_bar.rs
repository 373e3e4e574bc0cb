use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

/// Render the tab bar with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1]);
}

fn tab_label(app: &App, view: &View) -> String {
    match view {
        View::Tasks => "Tasks".to_string(),
        View::Board => "Board".to_string(),
        View::Schedule => "My Tasks".to_string(),
        View::Projects => "Projects".to_string(),
        View::Notifications => {
            if app.unread_count > 0 {
                format!("Alerts ({})", app.unread_count)
            } else {
                "Alerts".to_string()
            }
        }
        View::Detail { .. } => String::new(),
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let tabs = [
        View::Tasks,
        View::Board,
        View::Schedule,
        View::Projects,
        View::Notifications,
    ];

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(
        " \u{25A6} ",
        Style::default().fg(app.theme.purple).bg(bg),
    ));

    for (i, tab) in tabs.iter().enumerate() {
        // The detail view keeps the Tasks tab lit
        let is_current = app.view == *tab
            || (*tab == View::Tasks && matches!(app.view, View::Detail { .. }));
        let style = if is_current {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(format!(" {} ", tab_label(app, tab)), style));
        if i + 1 < tabs.len() {
            spans.push(Span::styled(
                "\u{2502}",
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    // Signed-in user on the right edge
    let name = app.session.user.display_name();
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let name_width = name.chars().count() + 1;
    if used + name_width < area.width as usize {
        let padding = area.width as usize - used - name_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            name,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect) {
    let line = "\u{2500}".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(line).style(
            Style::default()
                .fg(app.theme.dim)
                .bg(app.theme.background),
        ),
        area,
    );
}
