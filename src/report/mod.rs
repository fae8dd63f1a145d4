//! Rendering a [`Catalog`] as text.
//!
//! The CSV form writes one line per (artist, album) pair:
//!
//! ```text
//! "Bowie","Low","MP3","FLAC"
//! ```
//!
//! Every field is double quoted. With [`QuoteStyle::Verbatim`] (the default)
//! quote characters inside tag values are written as-is, which matches the
//! historical output but can yield lines a strict CSV parser rejects.
//! [`QuoteStyle::Escaped`] doubles them instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::catalog::{Catalog, FormatSet};

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// How quote characters inside field values are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Verbatim,
    Escaped,
}

/// Report rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub quote_style: QuoteStyle,
    /// Emit albums, artists and formats in lexicographic order
    pub sort: bool,
}

/// Wrap `value` in double quotes.
fn quote(value: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Verbatim => format!("\"{value}\""),
        QuoteStyle::Escaped => format!("\"{}\"", value.replace('"', "\"\"")),
    }
}

/// Render a single report line.
pub fn render_line<'a>(
    artist: &str,
    album: &str,
    formats: impl IntoIterator<Item = &'a str>,
    style: QuoteStyle,
) -> String {
    let mut line = format!("{},{}", quote(artist, style), quote(album, style));
    for format in formats {
        line.push(',');
        line.push_str(&quote(format, style));
    }
    line
}

fn sorted_formats(formats: &FormatSet) -> Vec<&str> {
    let mut formats: Vec<&str> = formats.iter().map(String::as_str).collect();
    formats.sort_unstable();
    formats
}

/// Produce the CSV lines for `catalog`, one per (album, artist) pair.
///
/// Order is unspecified unless `options.sort` is set.
pub fn emit(catalog: &Catalog, options: &ReportOptions) -> Vec<String> {
    let style = options.quote_style;

    if !options.sort {
        return catalog
            .entries()
            .map(|(album, artist, formats)| {
                render_line(artist, album, formats.iter().map(String::as_str), style)
            })
            .collect();
    }

    let mut albums: Vec<_> = catalog.albums().collect();
    albums.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut lines = Vec::with_capacity(catalog.pair_count());
    for (album, artists) in albums {
        let mut artists: Vec<_> = artists.iter().collect();
        artists.sort_unstable_by(|a, b| a.0.cmp(b.0));
        for (artist, formats) in artists {
            lines.push(render_line(artist, album, sorted_formats(formats), style));
        }
    }
    lines
}

/// Nested, sorted view of the catalog used for JSON output.
fn json_view(catalog: &Catalog) -> BTreeMap<&str, BTreeMap<&str, Vec<&str>>> {
    catalog
        .albums()
        .map(|(album, artists)| {
            let artists: BTreeMap<&str, Vec<&str>> = artists
                .iter()
                .map(|(artist, formats)| (artist.as_str(), sorted_formats(formats)))
                .collect();
            (album, artists)
        })
        .collect()
}

/// Write the full report to `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    options: &ReportOptions,
) -> io::Result<()> {
    match options.format {
        ReportFormat::Csv => {
            for line in emit(catalog, options) {
                writeln!(out, "{line}")?;
            }
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &json_view(catalog))?;
            writeln!(out)?;
        }
    }
    out.flush()
}
