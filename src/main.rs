use clap::Parser;
use colored::*;
use std::io;
use std::process::ExitCode;

use statusleak::cli::Cli;
use statusleak::Outcome;

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match statusleak::run(&cli, &mut out).await {
        Ok(Outcome::NotVulnerable) => {
            eprintln!("{}", "[-] Host not vulnerable".yellow());
            ExitCode::from(Outcome::NotVulnerable.exit_code())
        }
        Ok(outcome) => {
            if let Outcome::Exposed { printed, .. } = &outcome {
                tracing::info!(printed, "done");
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) if e.is_usage_hint() => {
            println!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "run aborted");
            eprintln!("{}", format!("[!] {}", e).red());
            ExitCode::FAILURE
        }
    }
}
