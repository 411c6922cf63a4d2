//! Finds commonly exposed status endpoints (PHP-FPM `status?full=true`,
//! Apache `server-status`, Prometheus `metrics`) on a host and lists the
//! request paths they leak.
//!
//! A run is strictly sequential: probe each known page in priority order,
//! stop on the first confirmed signature, fetch that page once more to
//! extract values, then print them sorted and filtered.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod scanner;

use colored::*;
use std::io::Write;

use crate::cli::Cli;
use crate::config::{BaseUrl, ScanConfig};
use crate::error::ProbeError;
use crate::http::Fetcher;
use crate::scanner::{Blacklist, PageKind, Registry};

/// How a run ended when nothing went wrong.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// `--list` printed the registry
    Listed,
    /// No probe body carried its signature
    NotVulnerable,
    /// A page was confirmed and its values printed (possibly none)
    Exposed {
        page: PageKind,
        url: String,
        printed: usize,
    },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::NotVulnerable => 1,
            Outcome::Listed | Outcome::Exposed { .. } => 0,
        }
    }
}

/// Execute one run. Results go to `out`, progress goes to stderr.
/// The caller alone turns the result into an exit code.
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Outcome, ProbeError> {
    let registry = Registry::builtin()?;

    if cli.list {
        list_page_types(&registry, out)?;
        return Ok(Outcome::Listed);
    }

    let raw = cli.url.as_deref().ok_or(ProbeError::MissingUrl)?;
    let base = BaseUrl::parse(raw)?;
    let config = ScanConfig::resolve(cli)?;
    tracing::debug!(?config, "resolved scan config");

    eprintln!("{}", format!("[*] Target: {}", base).cyan());

    let fetcher = Fetcher::new(&config)?;

    let detection = match scanner::detect(&fetcher, &base, &registry).await? {
        Some(detection) => detection,
        None => return Ok(Outcome::NotVulnerable),
    };

    eprintln!(
        "{}",
        format!(
            "[+] Discovered page type: {} ({})",
            detection.page.name(),
            detection.url
        )
        .green()
    );

    let values = scanner::extract(&fetcher, &detection).await?;

    let blacklist = Blacklist::new(config.exclude.iter().cloned());
    let ordered = scanner::finalize(&values, &blacklist);
    let prefix = config.absolute.then_some(&base);
    scanner::render(out, &ordered, prefix)?;

    Ok(Outcome::Exposed {
        page: detection.page.kind(),
        url: detection.url,
        printed: ordered.len(),
    })
}

fn list_page_types<W: Write>(registry: &Registry, out: &mut W) -> std::io::Result<()> {
    for page in registry.iter() {
        writeln!(
            out,
            "{:<22} {:<20} {}",
            page.name(),
            page.suffix(),
            page.signature()
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn missing_url_fails_before_any_request() {
        let cli = Cli::parse_from(["statusleak"]);
        let mut out = Vec::new();
        let err = run(&cli, &mut out).await.unwrap_err();
        assert!(matches!(err, ProbeError::MissingUrl));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn invalid_url_is_usage_error() {
        let cli = Cli::parse_from(["statusleak", "--url", "gopher://host"]);
        let mut out = Vec::new();
        let err = run(&cli, &mut out).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Usage);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn list_prints_registry_in_probe_order() {
        let cli = Cli::parse_from(["statusleak", "--list"]);
        let mut out = Vec::new();
        assert_eq!(run(&cli, &mut out).await.unwrap(), Outcome::Listed);

        let text = String::from_utf8(out).unwrap();
        let names: Vec<_> = text
            .lines()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(names, vec!["php-fpm", "apache-server-status", "prometheus"]);
        assert!(text.contains("/status?full=true"));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(Outcome::NotVulnerable.exit_code(), 1);
        assert_eq!(Outcome::Listed.exit_code(), 0);
        let exposed = Outcome::Exposed {
            page: PageKind::Prometheus,
            url: "http://h/metrics".into(),
            printed: 0,
        };
        assert_eq!(exposed.exit_code(), 0);
    }
}
