//! CLI argument definitions and the catalog command.

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};

use crate::catalog::Catalog;
use crate::config::{self, Config};
use crate::metadata::{LoftyReader, TagReader};
use crate::report::{self, QuoteStyle, ReportFormat, ReportOptions};
use crate::scanner::{ScanOptions, ScanSummary, build_catalog};

/// Generate a catalog of music in a directory
#[derive(Parser, Debug)]
#[command(
    name = "music-catalog",
    author,
    version,
    about,
    long_about = "Walks a directory tree of music files, reads their tags \
                  (ID3, Vorbis comments, MP4 atoms, APE and more), and writes \
                  one CSV line per artist and album listing the file formats \
                  found, e.g. \"Bowie\",\"Low\",\"MP3\",\"FLAC\"."
)]
pub struct Cli {
    /// Directory to scan
    pub directory: PathBuf,

    /// Config file (default: <config dir>/music-catalog/config.toml)
    #[arg(long, env = "MUSIC_CATALOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Sort output by album, then artist
    #[arg(long, overrides_with = "no_sort")]
    pub sort: bool,

    /// Keep the unsorted order even if the config enables sorting
    #[arg(long, overrides_with = "sort")]
    pub no_sort: bool,

    /// Double quote characters inside tag values
    #[arg(long, overrides_with = "no_escape_quotes")]
    pub escape_quotes: bool,

    /// Write quote characters inside tag values as-is
    #[arg(long, overrides_with = "escape_quotes")]
    pub no_escape_quotes: bool,

    /// Follow symbolic links while scanning
    #[arg(long, overrides_with = "no_follow_links")]
    pub follow_links: bool,

    /// Do not follow symbolic links, even if the config enables it
    #[arg(long, overrides_with = "follow_links")]
    pub no_follow_links: bool,

    /// Print scan statistics to stderr when done
    #[arg(long)]
    pub summary: bool,
}

/// Value of an `--x` / `--no-x` flag pair, `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    /// Merge flags over config file settings.
    pub fn options(&self, config: &Config) -> (ScanOptions, ReportOptions) {
        let mut scan = config.scan_options();
        if let Some(follow) = switch(self.follow_links, self.no_follow_links) {
            scan.follow_links = follow;
        }

        let mut report = config.report_options();
        if let Some(format) = self.format {
            report.format = format;
        }
        if let Some(sort) = switch(self.sort, self.no_sort) {
            report.sort = sort;
        }
        match switch(self.escape_quotes, self.no_escape_quotes) {
            Some(true) => report.quote_style = QuoteStyle::Escaped,
            Some(false) => report.quote_style = QuoteStyle::Verbatim,
            None => {}
        }

        (scan, report)
    }
}

/// Scan `cli.directory` with `reader` and write the report to `out`.
///
/// A directory that cannot be walked is logged and an empty report is still
/// written. Only a failure to write the report is returned as an error.
pub fn run<R, W>(
    cli: &Cli,
    config: &Config,
    reader: &R,
    out: &mut W,
) -> anyhow::Result<ScanSummary>
where
    R: TagReader + ?Sized,
    W: Write,
{
    let (scan_options, report_options) = cli.options(config);

    // A walk only fails before anything is catalogued
    let (catalog, summary) = match build_catalog(&cli.directory, reader, &scan_options) {
        Ok(built) => built,
        Err(e) => {
            error!("{}", e);
            (Catalog::new(), ScanSummary::default())
        }
    };
    if catalog.is_empty() {
        info!(path = %cli.directory.display(), "No tagged music found");
    }

    report::write_report(out, &catalog, &report_options).context("Failed to write report")?;
    Ok(summary)
}

/// Run the catalog command against stdout.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load(cli.config.as_deref());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run(cli, &config, &LoftyReader, &mut out)?;

    if cli.summary {
        eprintln!("{}", summary);
    }
    Ok(())
}
