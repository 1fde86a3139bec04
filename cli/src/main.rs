//! Interactive order matcher.
//!
//! Reads `buy|sell <quantity>@<price> [#<id>]` lines from stdin (or a file),
//! feeds them to the order book and prints the resulting trades.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;
mod config;
mod format;
mod parse;
mod session;

use config::Config;
use session::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config.log_level);

    info!(format = ?config.format, first_id = config.first_id, "order matcher starting");

    let mut session = Session::new(config.format, config.first_id);
    let mut out = io::stdout().lock();
    let mut err = io::stderr();
    let banner = !config.quiet;

    match &config.input {
        Some(path) => {
            let file = File::open(path)?;
            session.run(BufReader::new(file), &mut out, &mut err, banner)?;
        }
        None => session.run(io::stdin().lock(), &mut out, &mut err, banner)?,
    }

    info!(resting = session.book().len(), "order matcher stopped");
    Ok(())
}

/// Logs go to stderr so stdout only carries command output.
fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
