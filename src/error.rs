use std::path::PathBuf;

use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// Coarse classification used by the binary when reporting a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input from the operator.
    Usage,
    /// The GET itself failed (DNS, refused connection, timeout, TLS).
    Transport,
    /// The response body could not be scanned to the end.
    Read,
    /// The tool could not set itself up.
    Internal,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Please provide the base URL with the --url flag")]
    MissingUrl,

    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("failed to load config '{}': {source:#}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading response body from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: LinesCodecError,
    },

    #[error("failed to write results: {0}")]
    Output(#[from] std::io::Error),

    #[error("invalid extraction pattern for {page}: {source}")]
    Pattern {
        page: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::MissingUrl | ProbeError::InvalidUrl(_) | ProbeError::Config { .. } => {
                ErrorKind::Usage
            }
            ProbeError::Transport { .. } => ErrorKind::Transport,
            ProbeError::Read { .. } => ErrorKind::Read,
            ProbeError::Client(_) | ProbeError::Output(_) | ProbeError::Pattern { .. } => {
                ErrorKind::Internal
            }
        }
    }

    /// Usage hints go to stdout, everything else is a diagnostic.
    pub fn is_usage_hint(&self) -> bool {
        matches!(self, ProbeError::MissingUrl)
    }
}
