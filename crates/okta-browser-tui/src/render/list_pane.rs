use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Users ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let list = &app.list;
    let visible_height = inner.height as usize;
    if visible_height == 0 {
        return;
    }

    if list.visible_len() == 0 {
        let text = if list.entries().is_empty() {
            "No users in this directory"
        } else {
            "No users match the filter"
        };
        let hint = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    }

    let selected = list.selected_index();
    let lines: Vec<Line> = list
        .visible_entries()
        .enumerate()
        .skip(list.scroll_offset())
        .take(visible_height)
        .map(|(idx, entry)| {
            let style = if Some(idx) == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(format!("  {}", entry.id), style)];
            if let Some(label) = &entry.label {
                spans.push(Span::styled(
                    format!("  {label}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    if list.visible_len() > visible_height {
        let mut scrollbar_state = ScrollbarState::new(list.visible_len())
            .position(list.scroll_offset())
            .viewport_content_length(visible_height);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
    }
}
