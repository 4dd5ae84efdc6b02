//! ghcard - render a GitHub developer profile as HTML
//!
//! Looks up a user through the GitHub REST API, keeps the result for the
//! session, and prints the profile card (or the lookup error) to stdout.

use std::fs;
use std::io::{self, Write};
use std::process;

use clap::Parser;

use ghcard::app;
use ghcard::cli::{Cli, StartupConfig};
use ghcard::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    logging::init_logger(config.verbose);
    tracing::debug!(username = ?config.username, api = %config.api_url, "starting ghcard");

    let outcome = app::run(&config).await?;

    match config.output {
        Some(ref path) => {
            fs::write(path, &outcome.output)?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(outcome.output.as_bytes())?;
            if !outcome.output.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }

    if !outcome.success {
        process::exit(1);
    }

    Ok(())
}
