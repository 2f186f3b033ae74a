use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode};

/// Prompt line shown while a filter query is being typed.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let list = &app.list;
    let dim = Style::default().fg(Color::DarkGray);

    let count_style = if list.visible_len() == 0 {
        Style::default().fg(Color::Red)
    } else {
        dim
    };

    let mut spans = vec![
        Span::styled(
            " filter ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(list.filter()),
        Span::styled("_", Style::default().fg(Color::Magenta)),
        Span::styled(
            format!("  {}/{}", list.visible_len(), list.entries().len()),
            count_style,
        ),
        Span::styled("  \u{23ce} apply  esc cancel", dim),
    ];

    if app.mode == Mode::Loading {
        spans.push(Span::styled(
            "  (loading profile\u{2026})",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
