//! Music Catalog - list the albums, artists and file formats in a music tree.
//!
//! Walks a directory, reads the tags of every file it finds, and prints one
//! CSV line per (artist, album) pair with the formats seen for that pair.
//! The report goes to stdout; logs go to stderr.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod report;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; stdout is reserved for the report
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("music_catalog=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
