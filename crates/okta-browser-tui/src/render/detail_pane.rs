use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Profile ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let viewer = &app.detail;
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = viewer
        .lines()
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            if idx == 0 {
                Line::styled(text.clone(), header_style)
            } else {
                Line::from(text.clone())
            }
        })
        .collect();

    let content_length = lines.len();
    let visible_height = inner.height as usize;
    let scroll = u16::try_from(viewer.scroll()).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    if content_length > visible_height {
        let mut scrollbar_state = ScrollbarState::new(content_length)
            .position(viewer.scroll())
            .viewport_content_length(visible_height);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
    }
}
