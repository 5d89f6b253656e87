//! Durable per-identifier storage shared by the two pipeline stages.
//!
//! The acquisition stage creates files, the encoding stage only reads them;
//! that create-then-freeze contract is the only cross-stage handoff.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical divider token separating raw segments inside a record file.
pub const DIVIDER: &str = "++++++++++";

/// Extension for raw metadata records.
pub const METADATA_EXT: &str = "txt";

/// Extension for media assets.
pub const MEDIA_EXT: &str = "mp3";

/// Resolved store directories under one save path.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub metadata: PathBuf,
    pub media: PathBuf,
}

impl StorePaths {
    pub fn new(metadata: PathBuf, media: PathBuf) -> Self {
        Self { metadata, media }
    }

    /// Conventional layout under a single save directory.
    pub fn under(save_path: &Path) -> Self {
        Self {
            metadata: save_path.join("metadata"),
            media: save_path.join("media"),
        }
    }

    /// Create both store directories, failing fast if they are unwritable.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.metadata)
            .with_context(|| format!("create metadata store {}", self.metadata.display()))?;
        fs::create_dir_all(&self.media)
            .with_context(|| format!("create media store {}", self.media.display()))?;
        Ok(())
    }

    pub fn metadata_file(&self, identifier: &str) -> PathBuf {
        self.metadata.join(format!("{identifier}.{METADATA_EXT}"))
    }

    pub fn media_file(&self, identifier: &str) -> PathBuf {
        self.media.join(format!("{identifier}.{MEDIA_EXT}"))
    }

    /// An existing record file is the completion marker for resumability.
    pub fn has_record(&self, identifier: &str) -> bool {
        self.metadata_file(identifier).is_file()
    }
}

/// Join raw segments with the newline-padded divider.
pub fn join_record(segments: &[String]) -> String {
    segments.join(&format!("\n{DIVIDER}\n"))
}

/// Split a record body on the divider token, trimming and dropping empties.
pub fn split_record(body: &str) -> Vec<String> {
    body.split(DIVIDER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Persist one identifier's record.
pub fn write_record(paths: &StorePaths, identifier: &str, segments: &[String]) -> Result<()> {
    let path = paths.metadata_file(identifier);
    fs::write(&path, join_record(segments))
        .with_context(|| format!("write record {}", path.display()))?;
    Ok(())
}

/// Load one identifier's record, already split into segments.
pub fn read_record(paths: &StorePaths, identifier: &str) -> Result<Vec<String>> {
    let path = paths.metadata_file(identifier);
    let body =
        fs::read_to_string(&path).with_context(|| format!("read record {}", path.display()))?;
    Ok(split_record(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_round_trips_segments() {
        let segments: Vec<String> = ["word", "wɔːrd", "tag1\ntag2", "None"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(split_record(&join_record(&segments)), segments);
    }

    #[test]
    fn split_drops_empty_segments() {
        let body = format!("a\n{DIVIDER}\n\n{DIVIDER}\nb");
        assert_eq!(split_record(&body), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn record_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths::under(dir.path());
        paths.ensure().expect("ensure stores");

        let segments = vec!["слово".to_string(), "сло́во".to_string()];
        write_record(&paths, "слово", &segments).expect("write record");
        assert!(paths.has_record("слово"));
        assert_eq!(read_record(&paths, "слово").expect("read record"), segments);
    }

    #[test]
    fn missing_record_is_not_a_completion_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths::under(dir.path());
        paths.ensure().expect("ensure stores");
        assert!(!paths.has_record("absent"));
    }
}
