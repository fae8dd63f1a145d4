//! Directory traversal that folds file tags into a [`Catalog`].
//!
//! Per-file failures (a file that cannot be opened, or whose tags cannot be
//! read) never abort a scan. They are counted in the [`ScanSummary`] and
//! logged at debug level. Only a root that cannot be walked is reported as an
//! error.

use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::metadata::TagReader;

/// Classification of a visited filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symlinks (when not followed), sockets, devices, fifos
    Other,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// What happened to a single visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Not a regular file
    Skipped,
    /// Tags read and recorded
    Catalogued,
    OpenFailed,
    TagsFailed,
}

/// Counters for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Regular files visited
    pub files_seen: usize,
    pub catalogued: usize,
    pub open_failures: usize,
    pub tag_failures: usize,
    /// Entries below the root the walker could not read
    pub walk_errors: usize,
    /// Directories and non-regular entries
    pub skipped_entries: usize,
}

impl ScanSummary {
    /// Regular files left out of the catalog.
    pub fn skipped_files(&self) -> usize {
        self.open_failures + self.tag_failures
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files seen, {} catalogued, {} unreadable, {} without usable tags, {} walk errors",
            self.files_seen,
            self.catalogued,
            self.open_failures,
            self.tag_failures,
            self.walk_errors
        )
    }
}

/// Traversal options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

/// Accumulates a [`Catalog`] from visited files.
///
/// The builder owns the catalog until [`CatalogBuilder::finish`] hands it
/// back, so a partial catalog is still available after a failed walk.
pub struct CatalogBuilder<'r, R: TagReader + ?Sized> {
    reader: &'r R,
    catalog: Catalog,
    summary: ScanSummary,
}

impl<'r, R: TagReader + ?Sized> CatalogBuilder<'r, R> {
    pub fn new(reader: &'r R) -> Self {
        Self {
            reader,
            catalog: Catalog::new(),
            summary: ScanSummary::default(),
        }
    }

    /// Visit a single entry, recording its tags if it is a readable, tagged
    /// regular file. Never fails.
    pub fn visit(&mut self, path: &Path, kind: EntryKind) -> VisitOutcome {
        if kind != EntryKind::File {
            self.summary.skipped_entries += 1;
            return VisitOutcome::Skipped;
        }
        self.summary.files_seen += 1;

        // The handle is dropped before returning
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable file");
                self.summary.open_failures += 1;
                return VisitOutcome::OpenFailed;
            }
        };

        match self.reader.read_tags(path, &mut file) {
            Ok(tags) => {
                self.catalog.record(&tags);
                self.summary.catalogued += 1;
                VisitOutcome::Catalogued
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping file without usable tags");
                self.summary.tag_failures += 1;
                VisitOutcome::TagsFailed
            }
        }
    }

    /// Walk the full tree under `root`, visiting every entry.
    ///
    /// Fails only if the walk cannot start. Unreadable entries below the
    /// root are logged and counted.
    pub fn walk(&mut self, root: &Path, options: &ScanOptions) -> Result<()> {
        fs::metadata(root).map_err(|e| Error::walk(root, e.to_string()))?;

        for entry in WalkDir::new(root).follow_links(options.follow_links) {
            match entry {
                Ok(entry) => {
                    self.visit(entry.path(), entry.file_type().into());
                }
                Err(e) if e.depth() == 0 => {
                    return Err(Error::walk(root, e.to_string()));
                }
                Err(e) => {
                    warn!(path = ?e.path(), error = %e, "Could not read entry, continuing");
                    self.summary.walk_errors += 1;
                }
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[cfg(test)]
    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// Hand back the accumulated catalog and counters.
    pub fn finish(self) -> (Catalog, ScanSummary) {
        info!(
            files = self.summary.files_seen,
            catalogued = self.summary.catalogued,
            skipped = self.summary.skipped_files(),
            walk_errors = self.summary.walk_errors,
            albums = self.catalog.album_count(),
            "Catalog built"
        );
        (self.catalog, self.summary)
    }
}

/// Scan `root` and return the populated catalog.
pub fn build_catalog<R: TagReader + ?Sized>(
    root: &Path,
    reader: &R,
    options: &ScanOptions,
) -> Result<(Catalog, ScanSummary)> {
    let mut builder = CatalogBuilder::new(reader);
    builder.walk(root, options)?;
    Ok(builder.finish())
}
