//! In-memory catalog: album → effective artist → set of formats.
//!
//! Keys are stored exactly as they appear in the tags. Empty album or artist
//! names are ordinary keys, so untagged files still group together.

use std::collections::{HashMap, HashSet};

use crate::metadata::TagRecord;

/// Distinct format identifiers seen for one (album, artist) pair.
pub type FormatSet = HashSet<String>;

/// Artists recorded for a single album.
pub type AlbumEntry = HashMap<String, FormatSet>;

/// The full album → artist → formats aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    albums: HashMap<String, AlbumEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `format` for the (`album`, `artist`) pair.
    ///
    /// Returns `true` if the format was not already present for that pair.
    pub fn insert(&mut self, album: &str, artist: &str, format: &str) -> bool {
        self.albums
            .entry(album.to_string())
            .or_default()
            .entry(artist.to_string())
            .or_default()
            .insert(format.to_string())
    }

    /// Fold a tag record into the catalog under its effective artist.
    pub fn record(&mut self, tags: &TagRecord) -> bool {
        self.insert(&tags.album, tags.effective_artist(), &tags.file_type)
    }

    /// Formats recorded for a pair, if the pair exists.
    #[cfg(test)]
    pub fn formats(&self, album: &str, artist: &str) -> Option<&FormatSet> {
        self.albums.get(album)?.get(artist)
    }

    #[cfg(test)]
    pub fn album(&self, album: &str) -> Option<&AlbumEntry> {
        self.albums.get(album)
    }

    /// Iterate albums and their artist entries, in unspecified order.
    pub fn albums(&self) -> impl Iterator<Item = (&str, &AlbumEntry)> {
        self.albums.iter().map(|(album, entry)| (album.as_str(), entry))
    }

    /// Iterate every `(album, artist, formats)` triple, in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &FormatSet)> {
        self.albums.iter().flat_map(|(album, artists)| {
            artists
                .iter()
                .map(move |(artist, formats)| (album.as_str(), artist.as_str(), formats))
        })
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    /// Number of distinct (album, artist) pairs, i.e. report lines.
    pub fn pair_count(&self) -> usize {
        self.albums.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}
