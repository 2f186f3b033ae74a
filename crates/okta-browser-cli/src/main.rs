mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use okta_browser::Directory;
use okta_browser_okta::{OktaDirectory, OktaDirectoryConfig};
use okta_browser_tui::TuiOptions;

#[derive(Parser)]
#[command(name = "okta-browser")]
#[command(about = "Browse users and profiles in an Okta organization")]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/okta-browser/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the interactive TUI browser (default)
    Tui,
    /// Print every user's login and display name
    List,
    /// Print one user's profile
    Show {
        /// Login (or Okta user id) of the user
        login: String,
    },
}

fn build_directory() -> Result<OktaDirectory> {
    let creds = config::credentials_from_env()?;
    OktaDirectory::new(OktaDirectoryConfig {
        org_url: creds.org_url,
        api_token: creds.api_token,
    })
    .context("failed to create Okta client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = config::load_config(cli.config.as_deref())?;
    logging::init(&file_config.log_level);

    let directory = build_directory()?;
    tracing::info!(directory = directory.label(), "starting");

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let options = TuiOptions {
                fetch_timeout: file_config.fetch_timeout(),
            };
            okta_browser_tui::run(Arc::new(directory), options).await
        }
        Command::List => commands::list::run(&directory).await,
        Command::Show { login } => commands::show::run(&directory, &login).await,
    }
}
