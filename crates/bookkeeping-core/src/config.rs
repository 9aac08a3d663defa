//! Client configuration.
//!
//! Sources, highest priority first:
//! 1. Explicit values passed to [`ClientConfig::from_path_with`]
//! 2. `~/.config/bookkeeping/config.toml` (`[bookkeeping]` table)
//! 3. Environment variables (`BOOKKEEPING_URL`, `BOOKKEEPING_API_TOKEN`,
//!    `BOOKKEEPING_TIMEOUT_SECS`)
//!
//! ```toml
//! [bookkeeping]
//! url = "http://localhost:4000/api"
//! token = "eyJhbGciOi..."
//! timeout_secs = 30
//! ```

use crate::error::{BookkeepingError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("BookkeepingRustApi/", env!("CARGO_PKG_VERSION"));

pub const ENV_URL: &str = "BOOKKEEPING_URL";
pub const ENV_TOKEN: &str = "BOOKKEEPING_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "BOOKKEEPING_TIMEOUT_SECS";

/// Everything needed to open a session against the service.
///
/// `timeout` and `connect_timeout` are handed to the HTTP transport as-is;
/// `None` keeps the transport's own behaviour.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:4000/api`
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    bookkeeping: FileSection,
}

#[derive(Debug, Default, Deserialize)]
struct FileSection {
    url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Returns the path to the configuration file: ~/.config/bookkeeping/config.toml
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BookkeepingError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join("bookkeeping").join("config.toml"))
    }

    /// Loads from the default file, falling back to environment variables.
    pub fn load() -> Result<Self> {
        Self::from_path(Self::default_path()?)
    }

    /// Loads from `path`, falling back to environment variables for fields
    /// the file does not set. A missing file is not an error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let section = read_section(path.as_ref())?;
        Self::resolve(section, |key| std::env::var(key).ok())
    }

    /// Like [`from_path`](Self::from_path), with explicit values (e.g. command-line
    /// flags) taking precedence over both the file and the environment.
    pub fn from_path_with(
        path: impl AsRef<Path>,
        url: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let mut section = read_section(path.as_ref())?;
        section.url = url.or(section.url);
        section.token = token.or(section.token);
        Self::resolve(section, |key| std::env::var(key).ok())
    }

    fn resolve(section: FileSection, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = section
            .url
            .or_else(|| env(ENV_URL))
            .ok_or_else(|| {
                BookkeepingError::config(format!(
                    "Bookkeeping URL not found in config file or {}",
                    ENV_URL
                ))
            })?;

        let token = section
            .token
            .or_else(|| env(ENV_TOKEN))
            .ok_or_else(|| {
                BookkeepingError::config(format!(
                    "Bookkeeping token not found in config file or {}",
                    ENV_TOKEN
                ))
            })?;

        let timeout_secs = match section.timeout_secs {
            Some(secs) => Some(secs),
            None => env(ENV_TIMEOUT_SECS)
                .map(|raw| {
                    raw.trim().parse::<u64>().map_err(|e| {
                        BookkeepingError::config(format!(
                            "{} must be a number of seconds, got '{}': {}",
                            ENV_TIMEOUT_SECS, raw, e
                        ))
                    })
                })
                .transpose()?,
        };

        Ok(Self {
            base_url,
            token,
            user_agent: section
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: timeout_secs.map(Duration::from_secs),
            connect_timeout: section.connect_timeout_secs.map(Duration::from_secs),
        })
    }
}

fn read_section(path: &Path) -> Result<FileSection> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using environment only", path.display());
        return Ok(FileSection::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        BookkeepingError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;
    let file: ConfigFile = toml::from_str(&content)?;
    tracing::debug!("Loaded bookkeeping config from {}", path.display());

    Ok(file.bookkeeping)
}
