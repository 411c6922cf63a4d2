use clap::Parser;
use std::path::PathBuf;

/// Probe a host for exposed status pages (PHP-FPM, Apache server-status,
/// Prometheus) and list the request paths they leak
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the host (scheme://host[:port]); path and query are ignored
    #[arg(short, long)]
    pub url: Option<String>,

    /// JSON scan profile (timeout_secs, user_agent, max_line_length, exclude, absolute, redirect_limit)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds to wait for a connection or for more body bytes, 0 waits forever (default 10)
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print values prefixed with the base URL
    #[arg(short, long)]
    pub absolute: bool,

    /// Value to drop from the output; repeat to build the list (default: * - /)
    #[arg(short, long, value_name = "VALUE")]
    pub exclude: Vec<String>,

    /// User-Agent header sent with every probe
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Longest response line accepted before the scan aborts
    #[arg(long, value_name = "BYTES")]
    pub max_line_length: Option<usize>,

    /// List known status page types in probe order and exit
    #[arg(long)]
    pub list: bool,

    /// Log filter for diagnostics on stderr (RUST_LOG wins when set)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
