use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var that overrides the configured log filter, e.g. `okta_browser_tui=debug`.
pub const LOG_ENV_VAR: &str = "OKTA_BROWSER_LOG";

/// Log file: `<cache dir>/okta-browser/okta-browser.log`.
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("okta-browser").join("okta-browser.log"))
}

/// Install a file-backed subscriber. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr. Logging stays off if the
/// file cannot be opened.
pub fn init(default_level: &str) {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && std::fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init();
}
