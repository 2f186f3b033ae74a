use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use okta_browser::DirectoryEntry;

/// Whether the list is narrowed by a filter query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Off,
    /// The filter prompt is open and receives every keystroke.
    Editing,
    /// A query was accepted and still narrows the list.
    Applied,
}

/// The entry collection, its filter and the highlighted row.
pub struct ListBrowser {
    entries: Vec<DirectoryEntry>,
    /// Indices into `entries` that match the filter, in collection order.
    visible: Vec<usize>,
    /// Position in `visible`.
    cursor: usize,
    scroll_offset: usize,
    filter: String,
    filter_state: FilterState,
    width: u16,
    height: u16,
}

impl ListBrowser {
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        let mut list = Self {
            entries: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            filter: String::new(),
            filter_state: FilterState::Off,
            width: 0,
            height: 0,
        };
        list.load(entries);
        list
    }

    /// Replace the whole collection, drop any filter and select the first entry.
    pub fn load(&mut self, entries: Vec<DirectoryEntry>) {
        self.entries = entries;
        self.filter.clear();
        self.filter_state = FilterState::Off;
        self.recompute_visible();
    }

    pub fn selected(&self) -> Option<&DirectoryEntry> {
        self.visible
            .get(self.cursor)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// Cursor position among the visible entries, if anything is visible.
    pub fn selected_index(&self) -> Option<usize> {
        (self.cursor < self.visible.len()).then_some(self.cursor)
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Entries that pass the filter, in display order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.visible.iter().filter_map(|&idx| self.entries.get(idx))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn is_capturing_input(&self) -> bool {
        self.filter_state == FilterState::Editing
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.keep_cursor_visible();
    }

    /// Apply a navigation or filter keystroke.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.filter_state == FilterState::Editing {
            self.handle_filter_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_by(-1),
            KeyCode::PageDown => self.move_by(self.page() as isize),
            KeyCode::PageUp => self.move_by(-(self.page() as isize)),
            KeyCode::Char('g') | KeyCode::Home => self.move_to(0),
            KeyCode::Char('G') | KeyCode::End => {
                self.move_to(self.visible.len().saturating_sub(1))
            }
            KeyCode::Char('/') => {
                self.filter.clear();
                self.filter_state = FilterState::Editing;
                self.recompute_visible();
            }
            KeyCode::Esc if self.filter_state == FilterState::Applied => {
                self.filter.clear();
                self.filter_state = FilterState::Off;
                self.recompute_visible();
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.filter_state = FilterState::Off;
                self.recompute_visible();
            }
            KeyCode::Enter => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Off
                } else {
                    FilterState::Applied
                };
            }
            KeyCode::Down => self.move_by(1),
            KeyCode::Up => self.move_by(-1),
            KeyCode::Backspace => {
                self.filter.pop();
                self.recompute_visible();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.recompute_visible();
            }
            _ => {}
        }
    }

    fn page(&self) -> usize {
        (self.height as usize).max(1)
    }

    fn move_by(&mut self, delta: isize) {
        let target = self.cursor.saturating_add_signed(delta);
        self.move_to(target);
    }

    fn move_to(&mut self, index: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = index.min(self.visible.len() - 1);
        self.keep_cursor_visible();
    }

    fn keep_cursor_visible(&mut self) {
        let height = self.page();
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    fn recompute_visible(&mut self) {
        let query = self.filter.to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches(&query))
            .map(|(idx, _)| idx)
            .collect();
        self.cursor = 0;
        self.scroll_offset = 0;
    }
}
