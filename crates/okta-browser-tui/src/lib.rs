pub mod action;
pub mod app;
pub mod detail_viewer;
pub mod fetcher;
pub mod list_browser;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::ExecutableCommand;
use okta_browser::{Directory, DirectoryEntry};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::action::{Action, AppCommand};
use crate::app::App;
use crate::fetcher::{DEFAULT_FETCH_TIMEOUT, ProfileFetcher};

pub use detail_viewer::{format_profile, format_profile_body};

/// Knobs for the interactive browser.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Upper bound on each profile fetch.
    pub fetch_timeout: Duration,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Launch the interactive TUI. Returns when the user quits.
///
/// The initial listing happens before the terminal is touched; if it fails
/// the error is returned and no UI is shown.
pub async fn run(directory: Arc<dyn Directory>, options: TuiOptions) -> anyhow::Result<()> {
    let label = directory.label().to_owned();
    let entries = directory
        .list_entries()
        .await
        .with_context(|| format!("failed to load users from {label}"))?;

    tracing::info!(count = entries.len(), directory = %label, "initial listing loaded");

    // Terminal setup.
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, directory, entries, label, options).await;

    // Terminal teardown (always runs).
    disable_raw_mode()?;
    std::io::stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    directory: Arc<dyn Directory>,
    entries: Vec<DirectoryEntry>,
    label: String,
    options: TuiOptions,
) -> anyhow::Result<()> {
    use futures::StreamExt;

    let mut app = App::new(entries, label);

    let (action_tx, mut action_rx) = mpsc::channel::<Action>(32);
    let fetcher = ProfileFetcher::new(
        Arc::clone(&directory),
        action_tx.clone(),
        options.fetch_timeout,
    );
    let mut event_stream = EventStream::new();
    let mut tick_interval = interval(Duration::from_millis(250));

    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|frame| render::render(frame, &app))?;

        // Wait for next event.
        let command = tokio::select! {
            Some(event_result) = event_stream.next() => {
                match event_result {
                    Ok(event) => {
                        // Only key presses (not release/repeat) and resizes.
                        match &event {
                            Event::Key(key) if key.kind != KeyEventKind::Press => continue,
                            Event::Key(_) | Event::Resize(_, _) => {}
                            _ => continue,
                        }
                        app.handle_event(event)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal event error");
                        continue;
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.handle_action(action)
            }
            _ = tick_interval.tick() => {
                app.tick();
                AppCommand::None
            }
        };

        // Execute side effects.
        match command {
            AppCommand::None => {}
            AppCommand::Quit => break,
            AppCommand::FetchProfile(request) => {
                fetcher.issue(request);
            }
            AppCommand::ReloadEntries => {
                let directory = Arc::clone(&directory);
                let tx = action_tx.clone();
                tokio::spawn(async move {
                    let result = directory.list_entries().await.map_err(|e| format!("{e}"));
                    let _ = tx.send(Action::EntriesReloaded(result)).await;
                });
            }
        }
    }

    tracing::info!("user quit");
    Ok(())
}
