// src/bin/plagcheck.rs
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use plagcheck_core::cli::{self, Cli, Settings};
use plagcheck_core::exit::PlagExit;

fn main() -> PlagExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = Settings::resolve(&cli).and_then(|settings| cli::dispatch(&cli, &settings));
    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            cli::exit_code(&e)
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
