//! Test utilities and fixtures for music-catalog tests.
//!
//! Real audio fixtures are awkward to generate, so most scanner tests use
//! [`FakeReader`], which reads a one-line text fixture instead of real tags:
//!
//! ```text
//! artist<TAB>album artist<TAB>album<TAB>format
//! ```
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{FakeReader, tag_record, write_track};
//!
//! let dir = tempfile::tempdir().unwrap();
//! write_track(&dir.path().join("a.mp3"), &tag_record("Bowie", "", "Low", "MP3"));
//! let (catalog, _) = build_catalog(dir.path(), &FakeReader, &ScanOptions::default()).unwrap();
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::metadata::{TagReader, TagRecord};

/// [`TagReader`] that parses the text fixture format written by [`write_track`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeReader;

impl TagReader for FakeReader {
    fn read_tags(&self, path: &Path, file: &mut File) -> Result<TagRecord> {
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let line = contents.lines().next().unwrap_or_default();
        let fields: Vec<&str> = line.split('\t').collect();
        let [artist, album_artist, album, file_type] = fields[..] else {
            return Err(Error::metadata(path, "not a tag fixture"));
        };

        Ok(tag_record(artist, album_artist, album, file_type))
    }
}

/// Creates a TagRecord from its four fields.
pub fn tag_record(artist: &str, album_artist: &str, album: &str, file_type: &str) -> TagRecord {
    TagRecord {
        artist: artist.to_string(),
        album_artist: album_artist.to_string(),
        album: album.to_string(),
        file_type: file_type.to_string(),
    }
}

/// Writes a fixture that [`FakeReader`] reads back as `tags`.
pub fn write_track(path: &Path, tags: &TagRecord) {
    let line = format!(
        "{}\t{}\t{}\t{}\n",
        tags.artist, tags.album_artist, tags.album, tags.file_type
    );
    std::fs::write(path, line).expect("Failed to write track fixture");
}

/// Writes a file that no reader accepts.
pub fn write_garbage(path: &Path) {
    std::fs::write(path, "This is just some text, not music.\n").expect("Failed to write fixture");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fake_reader_reads_fixture() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("track.mp3");
        let tags = tag_record("Bowie", "", "Low", "MP3");
        write_track(&path, &tags);

        let mut file = File::open(&path).unwrap();
        assert_eq!(FakeReader.read_tags(&path, &mut file).unwrap(), tags);
    }

    #[test]
    fn test_fake_reader_keeps_empty_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("untagged.ogg");
        write_track(&path, &tag_record("", "", "", "OGG"));

        let mut file = File::open(&path).unwrap();
        let tags = FakeReader.read_tags(&path, &mut file).unwrap();
        assert!(tags.artist.is_empty());
        assert!(tags.album.is_empty());
        assert_eq!(tags.file_type, "OGG");
    }

    #[test]
    fn test_fake_reader_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        write_garbage(&path);

        let mut file = File::open(&path).unwrap();
        assert!(FakeReader.read_tags(&path, &mut file).is_err());
    }
}
