use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode};
use crate::list_browser::FilterState;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let hint_style = Style::default().fg(Color::DarkGray);

    let line = match app.mode {
        Mode::Error => {
            let text = match &app.last_error {
                Some(failure) => format!(" Failed to load {}: {}", failure.id, failure.error),
                None => " Failed to load profile".to_owned(),
            };
            Line::from(vec![
                Span::styled(text, Style::default().fg(Color::Red)),
                Span::styled("  \u{23ce} retry  esc dismiss", hint_style),
            ])
        }
        Mode::Loading => {
            let target = app
                .pending_fetch
                .as_ref()
                .map(|r| r.id.to_string())
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(
                    format!(" Loading profile for {target}\u{2026}"),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("  \u{23ce} open another instead", hint_style),
            ])
        }
        Mode::Browsing | Mode::Detail => {
            if let Some(msg) = &app.status_message {
                let style = if msg.is_error {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(Span::styled(format!(" {}", msg.text), style))
            } else if app.mode == Mode::Detail {
                Line::from(Span::styled(
                    " \u{2191}\u{2193} scroll  PgUp/PgDn page  g/G top/bottom  esc back",
                    hint_style,
                ))
            } else {
                let mut hints = String::from(
                    " \u{2191}\u{2193} navigate  / filter  \u{23ce} open  r reload  q quit",
                );
                if app.list.filter_state() == FilterState::Applied {
                    hints.push_str("  esc clear filter");
                }
                Line::from(Span::styled(hints, hint_style))
            }
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}
