use std::fmt::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use okta_browser::{Login, ProfileRecord};

/// Last line of every formatted profile.
pub const BACK_HINT: &str = "Press 'esc' to go back to the user list.";

/// Render a profile as the text shown in the detail pane.
pub fn format_profile(record: &ProfileRecord) -> String {
    let mut out = format_profile_body(record);
    out.push('\n');
    out.push_str(BACK_HINT);
    out
}

/// Header and one `name: value` line per field, without the navigation hint.
pub fn format_profile_body(record: &ProfileRecord) -> String {
    let mut out = String::new();
    match &record.login {
        Login::Known(login) => {
            let _ = writeln!(out, "User Profile for {login}\n");
        }
        Login::Unknown => out.push_str("User Profile (login unknown)\n\n"),
        Login::Unavailable => out.push_str("User Profile not available\n"),
    }
    for (name, value) in &record.fields {
        let _ = writeln!(out, "{name}: {value}");
    }
    out
}

/// Scrollable text pane.
#[derive(Debug, Default)]
pub struct DetailViewer {
    lines: Vec<String>,
    scroll: usize,
    width: u16,
    height: u16,
}

impl DetailViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content and scroll back to the top.
    pub fn set_content(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_owned).collect();
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let page = (self.height as usize).max(1);
        let half_page = (page / 2).max(1);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('d') if ctrl => self.scroll_down(half_page),
            KeyCode::Char('u') if ctrl => self.scroll_up(half_page),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_down(page),
            KeyCode::PageUp => self.scroll_up(page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.height as usize)
    }

    fn scroll_down(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.max_scroll());
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};
    use okta_browser::FieldValue;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn viewer_with_lines(count: usize, height: u16) -> DetailViewer {
        let text: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
        let mut viewer = DetailViewer::new();
        viewer.resize(80, height);
        viewer.set_content(&text.join("\n"));
        viewer
    }

    #[test]
    fn format_known_login() {
        let record = ProfileRecord::from_fields([
            ("login", FieldValue::text("bob")),
            ("department", FieldValue::text("eng")),
        ]);
        let text = format_profile(&record);
        assert_eq!(
            text,
            "User Profile for bob\n\ndepartment: eng\nlogin: bob\n\nPress 'esc' to go back to the user list."
        );
    }

    #[test]
    fn format_unknown_login_and_unavailable_value() {
        let record = ProfileRecord::from_fields([("title", FieldValue::Unavailable)]);
        let text = format_profile(&record);
        assert!(text.starts_with("User Profile (login unknown)\n\n"));
        assert!(text.contains("title: unavailable\n"));
        assert!(text.ends_with(BACK_HINT));
    }

    #[test]
    fn format_missing_profile() {
        let text = format_profile(&ProfileRecord::unavailable());
        assert_eq!(
            text,
            "User Profile not available\n\nPress 'esc' to go back to the user list."
        );
    }

    #[test]
    fn set_content_resets_scroll() {
        let mut viewer = viewer_with_lines(50, 10);
        viewer.handle_key(key(KeyCode::PageDown));
        assert_eq!(viewer.scroll(), 10);

        viewer.set_content("fresh");
        assert_eq!(viewer.scroll(), 0);
        assert_eq!(viewer.lines(), ["fresh".to_owned()]);
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut viewer = viewer_with_lines(15, 10);
        viewer.handle_key(key(KeyCode::PageDown));
        assert_eq!(viewer.scroll(), 5);
        viewer.handle_key(key(KeyCode::Down));
        assert_eq!(viewer.scroll(), 5);

        viewer.handle_key(key(KeyCode::Char('k')));
        assert_eq!(viewer.scroll(), 4);
        viewer.handle_key(key(KeyCode::Home));
        assert_eq!(viewer.scroll(), 0);
        viewer.handle_key(key(KeyCode::Up));
        assert_eq!(viewer.scroll(), 0);
    }

    #[test]
    fn ctrl_d_and_ctrl_u_move_half_a_page() {
        let mut viewer = viewer_with_lines(100, 10);
        viewer.handle_key(ctrl('d'));
        assert_eq!(viewer.scroll(), 5);
        viewer.handle_key(ctrl('u'));
        assert_eq!(viewer.scroll(), 0);
    }

    #[test]
    fn end_goes_to_last_page() {
        let mut viewer = viewer_with_lines(30, 10);
        viewer.handle_key(key(KeyCode::End));
        assert_eq!(viewer.scroll(), 20);
    }

    #[test]
    fn short_content_does_not_scroll() {
        let mut viewer = viewer_with_lines(3, 10);
        viewer.handle_key(key(KeyCode::PageDown));
        assert_eq!(viewer.scroll(), 0);
    }

    #[test]
    fn growing_the_pane_clamps_scroll() {
        let mut viewer = viewer_with_lines(30, 10);
        viewer.handle_key(key(KeyCode::End));
        viewer.resize(80, 25);
        assert_eq!(viewer.size(), (80, 25));
        assert_eq!(viewer.scroll(), 5);
    }

    #[test]
    fn clear_drops_content() {
        let mut viewer = viewer_with_lines(30, 10);
        viewer.clear();
        assert!(viewer.lines().is_empty());
        assert_eq!(viewer.scroll(), 0);
    }
}
