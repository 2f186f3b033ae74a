use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Okta org base URL, e.g. `https://example.okta.com`.
pub const ORG_URL_VAR: &str = "OKTA_ORG_URL";
/// Okta API token, sent as `Authorization: SSWS <token>`.
pub const API_TOKEN_VAR: &str = "OKTA_API_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("fetch_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Optional settings from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    pub fetch_timeout_secs: u64,
    pub log_level: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 15,
            log_level: "info".into(),
        }
    }
}

impl FileConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Credentials for the Okta management API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub org_url: String,
    pub api_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("org_url", &self.org_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Resolve both required settings through `lookup`. Empty values count as
/// missing, and every missing name is reported at once.
pub fn credentials_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, ConfigError> {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let org_url = get(ORG_URL_VAR);
    let api_token = get(API_TOKEN_VAR);

    match (org_url, api_token) {
        (Some(org_url), Some(api_token)) => Ok(Credentials { org_url, api_token }),
        (org_url, api_token) => {
            let mut missing = Vec::new();
            if org_url.is_none() {
                missing.push(ORG_URL_VAR);
            }
            if api_token.is_none() {
                missing.push(API_TOKEN_VAR);
            }
            Err(ConfigError::Missing(missing))
        }
    }
}

pub fn credentials_from_env() -> Result<Credentials, ConfigError> {
    credentials_from(|name| std::env::var(name).ok())
}

/// Config file path: `~/.config/okta-browser/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("okta-browser").join("config.toml"))
}

/// Load the config file. A missing file at the default location yields
/// defaults; an explicitly requested file must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(FileConfig::default()),
        },
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config(&contents).map_err(|e| match e {
        ParseFailure::Toml(source) => ConfigError::Parse { path, source },
        ParseFailure::ZeroTimeout => ConfigError::ZeroTimeout,
    })
}

enum ParseFailure {
    Toml(toml::de::Error),
    ZeroTimeout,
}

fn parse_config(contents: &str) -> Result<FileConfig, ParseFailure> {
    let config: FileConfig = toml::from_str(contents).map_err(ParseFailure::Toml)?;
    if config.fetch_timeout_secs == 0 {
        return Err(ParseFailure::ZeroTimeout);
    }
    Ok(config)
}
