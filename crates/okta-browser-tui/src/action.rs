use okta_browser::{DirectoryEntry, ProfileRecord};

use crate::fetcher::{FetchError, FetchRequest};

/// Commands returned by the app to the event loop for side-effect execution.
#[derive(Debug, PartialEq)]
pub enum AppCommand {
    /// No side effect needed.
    None,
    /// Quit the application.
    Quit,
    /// Fetch a profile in the background.
    FetchProfile(FetchRequest),
    /// Re-list the directory.
    ReloadEntries,
}

/// Actions dispatched back into the app from async tasks.
#[derive(Debug)]
pub enum Action {
    /// The fetch with this sequence number produced a profile.
    FetchSucceeded(u64, Box<ProfileRecord>),
    /// The fetch with this sequence number failed or timed out.
    FetchFailed(u64, FetchError),
    /// The entry list was reloaded.
    EntriesReloaded(Result<Vec<DirectoryEntry>, String>),
}
