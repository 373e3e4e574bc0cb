use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::view::{AssigneeFilter, DueFilter, GroupKey};

/// Render the status row (bottom of screen): transient messages, the
/// search prompt, active filter/sort/group summary, or key hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Search => {
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            pad_with_hint(&mut spans, "Enter search  Esc cancel", width, app);
            Line::from(spans)
        }
        Mode::Edit => {
            let label = match (&app.edit, &app.create) {
                (Some(session), _) => format!("edit {}", session.field.label()),
                (None, Some(_)) => "new task".to_string(),
                _ => String::new(),
            };
            let mut spans = vec![Span::styled(
                format!(" {} ", label),
                Style::default().fg(app.theme.background).bg(app.theme.yellow),
            )];
            if let Some(message) = &app.status_message {
                spans.push(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.red).bg(bg),
                ));
            }
            pad_with_hint(&mut spans, "Enter save  Esc cancel", width, app);
            Line::from(spans)
        }
        Mode::Move => {
            let mut spans = vec![Span::styled(
                " moving ",
                Style::default().fg(app.theme.background).bg(app.theme.highlight),
            )];
            pad_with_hint(&mut spans, "h/l pick column  Enter drop  Esc cancel", width, app);
            Line::from(spans)
        }
        Mode::Comment => {
            let label = if app.reply_to.is_some() { " reply " } else { " comment " };
            let mut spans = vec![Span::styled(
                label,
                Style::default().fg(app.theme.background).bg(app.theme.cyan),
            )];
            pad_with_hint(&mut spans, "Enter send  Tab mention  Esc cancel", width, app);
            Line::from(spans)
        }
        Mode::Navigate => {
            if let Some(message) = &app.status_message {
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(app.theme.yellow).bg(bg),
                ))
            } else {
                let summary = controls_summary(app);
                let mut spans = vec![Span::styled(
                    summary,
                    Style::default().fg(app.theme.dim).bg(bg),
                )];
                if app.show_key_hints {
                    pad_with_hint(&mut spans, "? help", width, app);
                }
                Line::from(spans)
            }
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn pad_with_hint(spans: &mut Vec<Span<'static>>, hint: &'static str, width: usize, app: &App) {
    let bg = app.theme.background;
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
}

/// One-line summary of the non-default view-model controls
fn controls_summary(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(status) = app.filters.status {
        parts.push(format!("status={}", status.label()));
    }
    if let Some(priority) = app.filters.priority {
        parts.push(format!("priority={}", priority.label()));
    }
    match app.filters.assignee {
        AssigneeFilter::All => {}
        AssigneeFilter::Unassigned => parts.push("assignee=unassigned".to_string()),
        AssigneeFilter::User(id) => parts.push(format!("assignee=#{}", id)),
    }
    if app.filters.due != DueFilter::All {
        parts.push(format!("due={}", app.filters.due.label()));
    }
    if let Some(search) = &app.last_search {
        parts.push(format!("/{}", search));
    }
    parts.push(format!(
        "sort={}{}",
        app.sort_key.label(),
        app.sort_dir.arrow()
    ));
    if app.group_key != GroupKey::None {
        parts.push(format!("group={}", app.group_key.label()));
    }
    format!(" {}", parts.join("  "))
}
