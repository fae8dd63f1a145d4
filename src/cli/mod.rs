//! Command-line interface for music-catalog.
//!
//! Parses the single directory argument and option flags, merges them with
//! the config file, runs the scan, and writes the report to stdout.

mod commands;

pub use commands::{Cli, run, run_command};
