use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::{App, Mode};
use crate::util::unicode;
use crate::view::EditField;

use super::mention_popup;
use super::task_table::scroll_start;

/// Render one task: fields up top, threaded comments below, composer at
/// the bottom while a comment is being written.
pub fn render_detail(frame: &mut Frame, app: &mut App, area: Rect, task_id: i64) {
    let Some(task) = app.find_task(task_id) else {
        let missing = Paragraph::new("  task no longer exists (Esc to go back)")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(missing, area);
        return;
    };

    let composer_height = if app.mode == Mode::Comment { 3 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(composer_height),
        ])
        .split(area);

    render_fields(frame, app, chunks[0], &task);
    render_comments(frame, app, chunks[1]);
    let composer_area = chunks[2];
    render_composer(frame, app, composer_area);

    if app.mode == Mode::Comment {
        mention_popup::render_mention_popup(frame, app, composer_area);
    }
}

fn field_value(app: &App, task_id: i64, field: EditField, current: String) -> (String, bool) {
    if let Some(session) = &app.edit
        && session.task_id == task_id
        && session.field == field
    {
        (format!("{}\u{258C}", session.buffer), true)
    } else {
        (current, false)
    }
}

fn render_fields(frame: &mut Frame, app: &App, area: Rect, task: &crate::model::Task) {
    let theme = &app.theme;
    let bg = theme.background;
    let status = theme.status_style(task.status);
    let priority = theme.priority_style(task.priority);

    let (title, title_editing) = field_value(app, task.id, EditField::Title, task.title.clone());
    let (description, desc_editing) = field_value(
        app,
        task.id,
        EditField::Description,
        task.description.clone().unwrap_or_else(|| "\u{2014}".to_string()),
    );
    let (due, due_editing) = field_value(
        app,
        task.id,
        EditField::DueDate,
        task.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "\u{2014}".to_string()),
    );

    let edit_style = Style::default().fg(theme.text_bright).bg(theme.selection_bg);
    let value_style = |editing: bool| if editing { edit_style } else { Style::default().fg(theme.text).bg(bg) };

    let project = app
        .projects
        .iter()
        .find(|p| p.id == task.project)
        .map(|p| p.title.clone())
        .unwrap_or_else(|| format!("#{}", task.project));

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", status.symbol),
                Style::default().fg(status.color).bg(bg),
            ),
            Span::styled(
                title,
                value_style(title_editing).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {}", project),
            Style::default().fg(theme.dim).bg(bg),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("   status ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(status.label, Style::default().fg(status.color).bg(bg)),
            Span::styled("   priority ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(priority.label, Style::default().fg(priority.color).bg(bg)),
            Span::styled("   due ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(due, value_style(due_editing)),
            Span::styled("   assignee ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(task.assignee_name(), Style::default().fg(theme.text).bg(bg)),
        ]),
        Line::from(vec![
            Span::styled("   ", Style::default().bg(bg)),
            Span::styled(description, value_style(desc_editing)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "   {} comment{}",
                app.detail_comments.len(),
                if app.detail_comments.len() == 1 { "" } else { "s" }
            ),
            Style::default().fg(theme.dim).bg(bg),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(bg))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_comments(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;

    if app.detail_comments.is_empty() {
        frame.render_widget(
            Paragraph::new("   no comments yet — press c to write one")
                .style(Style::default().fg(theme.dim).bg(bg)),
            area,
        );
        return;
    }

    // Two lines per comment
    let per_comment = 2;
    let visible = (area.height as usize / per_comment).max(1);
    let start = scroll_start(app.detail_comment_cursor, visible, app.detail_comments.len());
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (offset, comment) in app.detail_comments.iter().skip(start).take(visible).enumerate() {
        let index = start + offset;
        let selected = index == app.detail_comment_cursor;
        let row_bg = if selected { theme.selection_bg } else { bg };
        let indent = if comment.is_reply() { "     \u{21B3} " } else { "   " };
        let when = comment
            .created_at
            .map(|t| t.format("%b %d %H:%M").to_string())
            .unwrap_or_default();

        lines.push(Line::from(vec![
            Span::styled(indent, Style::default().fg(theme.dim).bg(row_bg)),
            Span::styled(
                comment.author.display_name(),
                Style::default()
                    .fg(theme.highlight)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", when),
                Style::default().fg(theme.dim).bg(row_bg),
            ),
        ]));
        let body_indent = if comment.is_reply() { "       " } else { "   " };
        lines.push(Line::from(Span::styled(
            unicode::fit_to_width(
                &format!("{}{}", body_indent, comment.content),
                width,
            ),
            Style::default()
                .fg(if selected { theme.text_bright } else { theme.text })
                .bg(row_bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn render_composer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    if app.mode != Mode::Comment {
        frame.render_widget(
            Paragraph::new(" c comment  R reply  e/D/d edit  s/p/a change  Esc back")
                .style(Style::default().fg(theme.dim).bg(theme.background)),
            area,
        );
        return;
    }

    let title = if app.reply_to.is_some() { " reply " } else { " comment " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.cyan).bg(theme.background))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = format!("{}\u{258C}", app.comment_input);
    frame.render_widget(
        Paragraph::new(text).style(
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background),
        ),
        inner,
    );
}
