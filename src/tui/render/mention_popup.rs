use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::view::mention::{filter_members, mention_at_cursor};

/// Maximum number of visible entries in the dropdown
const MAX_VISIBLE: usize = 6;

/// Render the member dropdown floating above the comment composer while
/// an `@`-mention is being typed.
pub fn render_mention_popup(frame: &mut Frame, app: &App, composer_area: Rect) {
    let Some(query) = mention_at_cursor(&app.comment_input, app.comment_cursor) else {
        return;
    };
    let matches = filter_members(&app.members, &query.query);
    if matches.is_empty() {
        return;
    }

    let theme = &app.theme;
    let count = matches.len().min(MAX_VISIBLE);

    let max_width = matches
        .iter()
        .take(MAX_VISIBLE)
        .map(|u| u.display_name().chars().count() + u.username.chars().count() + 4)
        .max()
        .unwrap_or(16)
        + 4;

    let popup_w = (max_width as u16).min(composer_area.width.saturating_sub(2)).max(16);
    let popup_h = count as u16 + 2;

    // Above the composer; below it if there is no room
    let y = composer_area.y.saturating_sub(popup_h);
    let x = composer_area.x + 2;
    let popup_area = Rect::new(
        x.min(frame.area().width.saturating_sub(popup_w)),
        y,
        popup_w,
        popup_h,
    );

    let selected = app.mention_selected.min(count.saturating_sub(1));
    let scroll_top = selected.saturating_sub(MAX_VISIBLE - 1);

    let mut lines: Vec<Line> = Vec::new();
    for (i, member) in matches.iter().skip(scroll_top).take(MAX_VISIBLE).enumerate() {
        let is_selected = scroll_top + i == app.mention_selected;
        let style = if is_selected {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        };
        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(
                format!("{} (@{})", member.display_name(), member.username),
                style,
            ),
        ]));
    }

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .style(Style::default().bg(theme.background));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
