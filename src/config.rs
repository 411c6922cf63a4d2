use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::error::ProbeError;

// --- Defaults ---

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;
pub const DEFAULT_EXCLUDE: &[&str] = &["*", "-", "/"];

fn default_user_agent() -> String {
    format!("statusleak/{}", env!("CARGO_PKG_VERSION"))
}

// --- Target ---

/// Target root in `scheme://host[:port]` form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Normalize operator input down to scheme and authority.
    /// Bare hosts get `https://`, path/query/fragment/userinfo are dropped.
    pub fn parse(raw: &str) -> Result<Self, ProbeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProbeError::MissingUrl);
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let parsed = Url::parse(&candidate)
            .map_err(|e| ProbeError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ProbeError::InvalidUrl(format!(
                    "{}: unsupported scheme '{}'",
                    trimmed, other
                )))
            }
        }

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ProbeError::InvalidUrl(format!("{}: missing host", trimmed)))?;

        // host_str() keeps IPv6 brackets; port() is None for the scheme default
        let base = match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        };
        Ok(Self(base))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full probe URL for a registry suffix such as `/server-status`.
    pub fn join(&self, suffix: &str) -> String {
        format!("{}{}", self.0, suffix)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Scan profile ---

/// Tunables for one run. Loadable from a JSON profile, then overridden by flags.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Connect and idle-read timeout, 0 disables it
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_line_length: usize,
    /// Placeholder values never printed
    pub exclude: Vec<String>,
    /// Prefix printed values with the base URL
    pub absolute: bool,
    pub redirect_limit: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            absolute: false,
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
        }
    }
}

impl ScanConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: ScanConfig =
            serde_json::from_str(&content).context("Invalid config format")?;
        Ok(config)
    }

    /// Defaults, then the `--config` file if any, then explicit flags.
    pub fn resolve(cli: &Cli) -> Result<Self, ProbeError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path).map_err(|source| ProbeError::Config {
                path: path.clone(),
                source,
            })?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(secs) = cli.timeout {
            self.timeout_secs = secs;
        }
        if let Some(ua) = &cli.user_agent {
            self.user_agent = ua.clone();
        }
        if let Some(max) = cli.max_line_length {
            self.max_line_length = max;
        }
        if !cli.exclude.is_empty() {
            self.exclude = cli.exclude.clone();
        }
        if cli.absolute {
            self.absolute = true;
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
