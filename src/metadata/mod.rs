//! Audio file tag reading.
//!
//! Uses the lofty crate for format-independent metadata access.
//! The container is detected from file content rather than the extension,
//! so mislabelled files are still recognised and non-audio files fail cleanly.
//!
//! The catalog builder only depends on the [`TagReader`] trait; [`LoftyReader`]
//! is the production implementation.

use lofty::file::{FileType, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};

/// Tags extracted from a single file.
///
/// Missing tags are represented by empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub artist: String,
    pub album_artist: String,
    pub album: String,
    pub file_type: String,
}

impl TagRecord {
    /// The artist a file is grouped under: the album artist when present,
    /// otherwise the track artist. Values are used verbatim.
    pub fn effective_artist(&self) -> &str {
        if self.album_artist.is_empty() {
            &self.artist
        } else {
            &self.album_artist
        }
    }
}

/// Extracts a [`TagRecord`] from an already opened file.
pub trait TagReader {
    /// Read tags from `file`. `path` is only used for error reporting.
    fn read_tags(&self, path: &Path, file: &mut File) -> Result<TagRecord>;
}

/// [`TagReader`] backed by lofty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyReader;

impl TagReader for LoftyReader {
    fn read_tags(&self, path: &Path, file: &mut File) -> Result<TagRecord> {
        let tagged_file = Probe::new(BufReader::new(file))
            .guess_file_type()
            .map_err(|e| Error::metadata(path, e.to_string()))?
            .read()
            .map_err(|e| Error::metadata(path, e.to_string()))?;

        // Get the primary tag, or fall back to the first available tag
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());

        let artist = tag
            .and_then(|t| t.artist().map(|s| s.to_string()))
            .unwrap_or_default();

        let album_artist = tag
            .and_then(|t| t.get_string(&ItemKey::AlbumArtist).map(str::to_string))
            .unwrap_or_default();

        let album = tag
            .and_then(|t| t.album().map(|s| s.to_string()))
            .unwrap_or_default();

        Ok(TagRecord {
            artist,
            album_artist,
            album,
            file_type: format_name(tagged_file.file_type()).to_string(),
        })
    }
}

/// Format identifier reported for a detected container.
pub fn format_name(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Mpeg => "MP3",
        FileType::Flac => "FLAC",
        FileType::Mp4 => "M4A",
        FileType::Vorbis => "OGG",
        FileType::Opus => "OPUS",
        FileType::Speex => "SPX",
        FileType::Wav => "WAV",
        FileType::Aiff => "AIFF",
        FileType::Aac => "AAC",
        FileType::Ape => "APE",
        FileType::WavPack => "WV",
        FileType::Mpc => "MPC",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::config::WriteOptions;
    use lofty::tag::{Tag, TagExt, TagType};
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    /// Minimal 16-bit mono PCM WAV: 44-byte header plus `samples` of silence.
    fn write_wav(path: &Path, samples: u32) {
        let data_len = samples * 2;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // channels
        bytes.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
        bytes.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
        bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        std::fs::write(path, bytes).expect("Failed to write wav fixture");
    }

    fn read_path(path: &Path) -> Result<TagRecord> {
        let mut handle = File::open(path).expect("Failed to open fixture");
        LoftyReader.read_tags(path, &mut handle)
    }

    #[test]
    fn test_read_untagged_wav_yields_empty_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_wav(&path, 800);

        let record = read_path(&path).unwrap();

        assert_eq!(
            record,
            TagRecord {
                file_type: "WAV".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_read_tagged_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tagged.wav");
        write_wav(&path, 800);

        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_artist("Eno".to_string());
        tag.set_album("Low".to_string());
        tag.insert_text(ItemKey::AlbumArtist, "Bowie".to_string());
        tag.save_to_path(&path, WriteOptions::default())
            .expect("Failed to write tag");

        let record = read_path(&path).unwrap();

        assert_eq!(record.artist, "Eno");
        assert_eq!(record.album_artist, "Bowie");
        assert_eq!(record.album, "Low");
        assert_eq!(record.file_type, "WAV");
        assert_eq!(record.effective_artist(), "Bowie");
    }

    #[test]
    fn test_read_wav_with_only_a_riff_info_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("info.wav");
        write_wav(&path, 800);

        // RIFF INFO is not the primary WAV tag, so this exercises the fallback
        let mut tag = Tag::new(TagType::RiffInfo);
        tag.set_artist("Eno".to_string());
        tag.set_album("Another Green World".to_string());
        tag.save_to_path(&path, WriteOptions::default())
            .expect("Failed to write tag");

        let record = read_path(&path).unwrap();

        assert_eq!(record.artist, "Eno");
        assert_eq!(record.album, "Another Green World");
        assert!(record.album_artist.is_empty());
    }

    #[test]
    fn test_read_non_audio_file_returns_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "This is just some text, not music.")
            .expect("Failed to write to temp file");

        let mut handle = File::open(file.path()).expect("Failed to reopen temp file");
        let result = LoftyReader.read_tags(file.path(), &mut handle);

        assert!(matches!(result, Err(Error::Metadata { .. })));
    }

    #[test]
    fn test_read_empty_file_returns_error() {
        let file = NamedTempFile::new().expect("Failed to create temp file");
        let mut handle = File::open(file.path()).expect("Failed to reopen temp file");

        assert!(LoftyReader.read_tags(file.path(), &mut handle).is_err());
    }

    #[test]
    fn test_effective_artist_prefers_album_artist() {
        let record = TagRecord {
            artist: "Brian Eno".to_string(),
            album_artist: "Various Artists".to_string(),
            album: "No New York".to_string(),
            file_type: "MP3".to_string(),
        };
        assert_eq!(record.effective_artist(), "Various Artists");
    }

    #[test]
    fn test_effective_artist_falls_back_to_artist() {
        let record = TagRecord {
            artist: "Bowie".to_string(),
            album: "Low".to_string(),
            ..Default::default()
        };
        assert_eq!(record.effective_artist(), "Bowie");
    }

    #[test]
    fn test_effective_artist_is_not_trimmed() {
        let record = TagRecord {
            artist: "Bowie".to_string(),
            album_artist: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(record.effective_artist(), " ");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(format_name(FileType::Mpeg), "MP3");
        assert_eq!(format_name(FileType::Flac), "FLAC");
        assert_eq!(format_name(FileType::Mp4), "M4A");
        assert_eq!(format_name(FileType::Vorbis), "OGG");
    }
}
