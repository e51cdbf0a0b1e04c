//! # hnreader
//!
//! Opens a batch of tech news stories as browser tabs from the command line.
//!
//! ## Sources
//!
//! Hacker News, r/programming, Lobsters, DZone and dev.to. See
//! [`sources`] for how each one is read.
//!
//! ## Usage
//!
//! ```sh
//! hnreader run --tabs 5 --browser firefox --source lobsters
//! ```
//!
//! ## Architecture
//!
//! 1. **Input**: `cli` parses the flags into a `RunRequest`
//! 2. **Fetching**: exactly one source returns position-keyed story URLs
//! 3. **Dispatch**: `runner` sorts the positions and opens each URL in the
//!    browser picked by `browser`, falling back to the system default
//!
//! Exit status is 0 unless the default browser itself fails to open a link.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod browser;
mod cli;
mod console;
mod error;
mod models;
mod runner;
mod sources;

use browser::SystemOpener;
use cli::{Cli, Command};
use sources::NewsSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tfmt::time::ChronoUtc::new("%H:%M:%S".to_string()))
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed CLI arguments");

    match cli.command {
        Command::Run(args) => {
            print!(
                "{}",
                console::banner(
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION"),
                    env!("CARGO_PKG_DESCRIPTION"),
                )
            );

            let request = match args.to_request() {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("{}", console::alert(&e.to_string()));
                    return Ok(ExitCode::SUCCESS);
                }
            };

            let client = sources::build_client()?;
            let source = NewsSource::new(request.source, client);

            match runner::run_app(&request, &source, &SystemOpener).await {
                Ok(report) => {
                    info!(
                        opened = report.opened.len(),
                        fallbacks = report.fallbacks,
                        "Done"
                    );
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", console::alert(&e.to_string()));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
