mod detail_pane;
mod filter_bar;
mod list_pane;
mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Mode};
use crate::list_browser::FilterState;

pub fn render(frame: &mut Frame, app: &App) {
    let [title, body, bottom] = split(frame.area());

    render_title_bar(frame, title, app);

    // The list stays on screen while a profile loads or after a failure.
    match app.mode {
        Mode::Detail => detail_pane::render(frame, body, app),
        Mode::Browsing | Mode::Loading | Mode::Error => list_pane::render(frame, body, app),
    }

    if app.list.is_capturing_input() && app.mode != Mode::Detail {
        filter_bar::render(frame, bottom, app);
    } else {
        status_bar::render(frame, bottom, app);
    }
}

/// Inner area (inside the borders) available to the list and detail panes
/// for a terminal of the given size.
pub fn body_inner(area: Rect) -> Rect {
    let [_, body, _] = split(area);
    Block::default().borders(Borders::ALL).inner(body)
}

/// Title bar (1), body, bottom bar (1).
fn split(area: Rect) -> [Rect; 3] {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    [outer[0], outer[1], outer[2]]
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::DarkGray);
    let filter_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" Okta Users", title_style),
        Span::raw("  "),
        Span::styled(format!("[{}]", app.directory_label), label_style),
        Span::raw(" "),
        Span::styled(format!("({})", app.list.entries().len()), label_style),
    ];

    if app.list.filter_state() == FilterState::Applied {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{{filter:{}}}", app.list.filter()),
            filter_style,
        ));
    }

    if app.reloading {
        spans.push(Span::styled("  reloading\u{2026}", label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
