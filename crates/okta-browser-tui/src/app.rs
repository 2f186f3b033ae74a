use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use okta_browser::{DirectoryEntry, EntryId, ProfileRecord};
use ratatui::layout::Rect;

use crate::action::{Action, AppCommand};
use crate::detail_viewer::{DetailViewer, format_profile};
use crate::fetcher::{FetchError, FetchRequest};
use crate::list_browser::ListBrowser;

/// Top-level view the app is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The entry list has focus.
    Browsing,
    /// A profile fetch is outstanding.
    Loading,
    /// A fetched profile is displayed.
    Detail,
    /// The last fetch failed; the list keeps focus.
    Error,
}

/// What a key means to the controller before it is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Confirm,
    Back,
    Quit,
    Reload,
    Other,
}

impl Intent {
    fn of(key: &KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => Self::Confirm,
            KeyCode::Esc => Self::Back,
            KeyCode::Char('c') if ctrl => Self::Quit,
            KeyCode::Char('q') => Self::Quit,
            KeyCode::Char('r') if !ctrl => Self::Reload,
            _ => Self::Other,
        }
    }
}

/// The most recent failed fetch.
#[derive(Debug)]
pub struct FetchFailure {
    pub id: EntryId,
    pub error: FetchError,
}

/// Transient status message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Remaining ticks before the message expires.
    pub ticks_remaining: u8,
}

/// The TUI application state. This is a pure state machine:
/// inputs produce commands (side effects), actions update state.
pub struct App {
    /// Label of the directory being browsed.
    pub directory_label: String,
    /// Entry collection, filter and selection.
    pub list: ListBrowser,
    /// Scrollable pane holding the formatted current profile.
    pub detail: DetailViewer,
    /// Current view mode.
    pub mode: Mode,

    /// Profile shown in `Detail` mode.
    pub current_profile: Option<ProfileRecord>,
    /// Highest fetch sequence number issued so far (0 = none).
    pub last_issued: u64,
    /// The fetch whose result is awaited while `Loading`.
    pub pending_fetch: Option<FetchRequest>,
    /// Failure displayed in `Error` mode.
    pub last_error: Option<FetchFailure>,

    /// Transient feedback message.
    pub status_message: Option<StatusMessage>,
    /// Whether a list reload is in flight.
    pub reloading: bool,
    /// Reloaded entries waiting for the list to regain focus.
    pub deferred_reload: Option<Vec<DirectoryEntry>>,
}

impl App {
    /// Create the app from the initial directory listing.
    pub fn new(entries: Vec<DirectoryEntry>, directory_label: String) -> Self {
        Self {
            directory_label,
            list: ListBrowser::new(entries),
            detail: DetailViewer::new(),
            mode: Mode::Browsing,
            current_profile: None,
            last_issued: 0,
            pending_fetch: None,
            last_error: None,
            status_message: None,
            reloading: false,
            deferred_reload: None,
        }
    }

    /// Handle a terminal event, returning a command for the event loop.
    pub fn handle_event(&mut self, event: Event) -> AppCommand {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => {
                self.resize(width, height);
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    /// Handle an async action (result from a background task).
    pub fn handle_action(&mut self, action: Action) -> AppCommand {
        match action {
            Action::FetchSucceeded(seq, record) => {
                if self.take_pending(seq).is_none() {
                    return AppCommand::None;
                }
                self.detail.set_content(&format_profile(&record));
                self.current_profile = Some(*record);
                self.mode = Mode::Detail;
                AppCommand::None
            }
            Action::FetchFailed(seq, error) => {
                let Some(request) = self.take_pending(seq) else {
                    return AppCommand::None;
                };
                self.last_error = Some(FetchFailure {
                    id: request.id,
                    error,
                });
                self.enter_list_mode(Mode::Error);
                AppCommand::None
            }
            Action::EntriesReloaded(result) => {
                self.reloading = false;
                match result {
                    Ok(entries) => match self.mode {
                        Mode::Browsing | Mode::Error => self.apply_reload(entries),
                        // Held until the list has focus so the selection
                        // behind an open profile or outstanding fetch is kept.
                        Mode::Loading | Mode::Detail => self.deferred_reload = Some(entries),
                    },
                    Err(msg) => {
                        self.set_status(format!("Reload failed: {msg}"), true);
                    }
                }
                AppCommand::None
            }
        }
    }

    /// Tick the app forward (called on interval). Used for expiring status messages.
    pub fn tick(&mut self) {
        if let Some(msg) = &mut self.status_message {
            if msg.ticks_remaining == 0 {
                self.status_message = None;
            } else {
                msg.ticks_remaining -= 1;
            }
        }
    }

    /// Propagate a new terminal size to both panes, whatever the mode.
    pub fn resize(&mut self, width: u16, height: u16) {
        let inner = crate::render::body_inner(Rect::new(0, 0, width, height));
        self.list.resize(inner.width, inner.height);
        self.detail.resize(inner.width, inner.height);
    }

    fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        // An open filter prompt takes every key, including Enter and 'q'.
        if self.mode != Mode::Detail && self.list.is_capturing_input() {
            self.list.handle_key(key);
            return AppCommand::None;
        }

        // The list stays live while a fetch is outstanding.
        match (self.mode, Intent::of(&key)) {
            (Mode::Detail, Intent::Back) => {
                self.current_profile = None;
                self.detail.clear();
                self.enter_list_mode(Mode::Browsing);
                AppCommand::None
            }
            (Mode::Detail, _) => {
                self.detail.handle_key(key);
                AppCommand::None
            }

            (Mode::Browsing, Intent::Quit) => AppCommand::Quit,
            (_, Intent::Quit) => AppCommand::None,
            (_, Intent::Confirm) => self.confirm_selection(),
            (_, Intent::Reload) => self.request_reload(),
            (Mode::Error, Intent::Back) => {
                self.last_error = None;
                self.mode = Mode::Browsing;
                AppCommand::None
            }
            (Mode::Browsing | Mode::Loading | Mode::Error, _) => {
                self.list.handle_key(key);
                AppCommand::None
            }
        }
    }

    /// Switch to a mode where the list has focus, applying any reload that
    /// arrived while it did not.
    fn enter_list_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if let Some(entries) = self.deferred_reload.take() {
            self.apply_reload(entries);
        }
    }

    fn apply_reload(&mut self, entries: Vec<DirectoryEntry>) {
        let count = entries.len();
        self.list.load(entries);
        self.set_status(format!("Loaded {count} users"), false);
    }

    /// Issue a fetch for the highlighted entry, superseding any earlier one.
    fn confirm_selection(&mut self) -> AppCommand {
        let Some(entry) = self.list.selected() else {
            return AppCommand::None;
        };
        let request = FetchRequest::after(self.last_issued, entry.id.clone());
        self.last_issued = request.seq;
        self.pending_fetch = Some(request.clone());
        self.last_error = None;
        self.mode = Mode::Loading;
        AppCommand::FetchProfile(request)
    }

    fn request_reload(&mut self) -> AppCommand {
        if self.reloading {
            return AppCommand::None;
        }
        self.reloading = true;
        AppCommand::ReloadEntries
    }

    /// Claim the pending request if `seq` is the latest one issued.
    fn take_pending(&mut self, seq: u64) -> Option<FetchRequest> {
        match &self.pending_fetch {
            Some(request) if request.seq == seq && seq == self.last_issued => {
                self.pending_fetch.take()
            }
            _ => {
                tracing::debug!(
                    seq,
                    last_issued = self.last_issued,
                    "discarding stale fetch result"
                );
                None
            }
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text,
            is_error,
            ticks_remaining: 12, // ~3 seconds at 250ms tick
        });
    }
}
