//! Encoding stage: persisted records to a validated, packaged deck.
//!
//! Per identifier the pipeline is load → split → transform → accept or
//! reject. Rejection is per-row and logged; nothing at this stage retries,
//! since a mismatch is a data-quality problem to fix upstream.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::index::IndexEntry;
use crate::package::{Deck, PackageWriter};
use crate::store::{self, StorePaths, MEDIA_EXT, METADATA_EXT};
use crate::template::FieldTemplate;
use crate::transform::SliceTransformer;

/// End-of-run accounting for one encoding batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub accepted: usize,
    pub arity_mismatches: usize,
    pub missing_metadata: usize,
    pub missing_media: usize,
}

/// Everything one encoding invocation needs besides the index.
pub struct EncodeJob<'a> {
    pub deck_id: i64,
    pub deck_name: &'a str,
    pub save_path: &'a Path,
    pub paths: &'a StorePaths,
    pub template: FieldTemplate,
    pub transformer: &'a dyn SliceTransformer,
    pub writer: &'a dyn PackageWriter,
}

/// Build, validate, and package a deck from persisted records.
pub fn run(job: EncodeJob<'_>, entries: &[IndexEntry]) -> Result<EncodeSummary> {
    let mut summary = EncodeSummary::default();
    let arity = job.template.arity();
    let mut deck = Deck::new(job.deck_id, job.deck_name, job.template);

    for entry in entries {
        let identifier = entry.identifier.as_str();
        if !job.paths.has_record(identifier) {
            summary.missing_metadata += 1;
            tracing::error!(
                identifier,
                store = %job.paths.metadata.display(),
                "record missing, skipping"
            );
            continue;
        }
        let segments = match store::read_record(job.paths, identifier) {
            Ok(segments) => segments,
            Err(err) => {
                summary.missing_metadata += 1;
                tracing::error!(identifier, error = %err, "record unreadable, skipping");
                continue;
            }
        };
        let row = job.transformer.transform(&segments);
        if row.len() == arity {
            deck.push_row(row);
            summary.accepted += 1;
        } else {
            summary.arity_mismatches += 1;
            tracing::error!(
                identifier,
                expected = arity,
                actual = row.len(),
                "field count mismatch, dropping from deck"
            );
        }
    }

    let media_files = collect_media(job.paths, entries, &mut summary);

    fs::create_dir_all(job.save_path)
        .with_context(|| format!("create save dir {}", job.save_path.display()))?;
    job.writer.write(&deck, &media_files, job.save_path)?;

    tracing::info!(
        accepted = summary.accepted,
        arity_mismatches = summary.arity_mismatches,
        missing_metadata = summary.missing_metadata,
        missing_media = summary.missing_media,
        "encoding finished"
    );
    Ok(summary)
}

fn collect_media(
    paths: &StorePaths,
    entries: &[IndexEntry],
    summary: &mut EncodeSummary,
) -> Vec<PathBuf> {
    let mut media_files = Vec::new();
    for entry in entries {
        let path = paths.media_file(&entry.identifier);
        if path.is_file() {
            media_files.push(path);
        } else {
            summary.missing_media += 1;
            tracing::warn!(
                identifier = %entry.identifier,
                store = %paths.media.display(),
                "media missing, omitting"
            );
        }
    }
    media_files
}

/// Report identifiers whose expected files are absent, one report per store.
///
/// Missing files are informational here; the run succeeds and operators
/// consume the `{store}_broken.txt` reports. No packaging occurs.
pub fn check(paths: &StorePaths, entries: &[IndexEntry], save_path: &Path) -> Result<()> {
    fs::create_dir_all(save_path)
        .with_context(|| format!("create save dir {}", save_path.display()))?;
    for (store_dir, extension) in [(&paths.metadata, METADATA_EXT), (&paths.media, MEDIA_EXT)] {
        if !store_dir.is_dir() {
            tracing::error!(store = %store_dir.display(), "store is not a directory, skipping");
            continue;
        }
        let broken: Vec<&str> = entries
            .iter()
            .map(|entry| entry.identifier.as_str())
            .filter(|identifier| !store_dir.join(format!("{identifier}.{extension}")).is_file())
            .collect();
        tracing::info!(
            store = %store_dir.display(),
            broken = broken.len(),
            total = entries.len(),
            "store checked"
        );

        let base = store_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| extension.to_string());
        let report = save_path.join(format!("{base}_broken.txt"));
        let mut body = broken.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(&report, body)
            .with_context(|| format!("write broken report {}", report.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::JsonPackageWriter;
    use crate::transform::IdentityTransformer;

    fn entries(identifiers: &[&str]) -> Vec<IndexEntry> {
        identifiers
            .iter()
            .map(|identifier| IndexEntry {
                identifier: identifier.to_string(),
                rank: None,
            })
            .collect()
    }

    fn template(arity: usize) -> FieldTemplate {
        FieldTemplate {
            id: 1,
            name: "Note".to_string(),
            fields: (0..arity).map(|i| format!("field{i}")).collect(),
            front: String::new(),
            back: String::new(),
            style: String::new(),
        }
    }

    fn seed(paths: &StorePaths, identifier: &str, segments: &[&str]) {
        let segments: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        store::write_record(paths, identifier, &segments).expect("seed record");
    }

    #[test]
    fn arity_gate_accepts_exact_and_rejects_short_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths::under(dir.path());
        paths.ensure().expect("ensure stores");
        seed(&paths, "good", &["a", "b", "c"]);
        seed(&paths, "short", &["a", "b"]);

        let summary = run(
            EncodeJob {
                deck_id: 7,
                deck_name: "deck",
                save_path: dir.path(),
                paths: &paths,
                template: template(3),
                transformer: &IdentityTransformer,
                writer: &JsonPackageWriter,
            },
            &entries(&["good", "short", "absent"]),
        )
        .expect("encode");

        assert_eq!(
            summary,
            EncodeSummary {
                accepted: 1,
                arity_mismatches: 1,
                missing_metadata: 1,
                missing_media: 3,
            }
        );
    }

    #[test]
    fn deck_rows_follow_index_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths::under(dir.path());
        paths.ensure().expect("ensure stores");
        seed(&paths, "b", &["b1"]);
        seed(&paths, "a", &["a1"]);

        run(
            EncodeJob {
                deck_id: 7,
                deck_name: "ordered",
                save_path: dir.path(),
                paths: &paths,
                template: template(1),
                transformer: &IdentityTransformer,
                writer: &JsonPackageWriter,
            },
            &entries(&["b", "a"]),
        )
        .expect("encode");

        let body = fs::read_to_string(dir.path().join("7_ordered.deck.json"))
            .expect("read artifact");
        let value: serde_json::Value = serde_json::from_str(&body).expect("parse artifact");
        assert_eq!(value["deck"]["rows"][0][0], "b1");
        assert_eq!(value["deck"]["rows"][1][0], "a1");
    }

    #[test]
    fn existing_media_is_collected_and_missing_media_is_omitted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths::under(dir.path());
        paths.ensure().expect("ensure stores");
        seed(&paths, "a", &["a1"]);
        seed(&paths, "b", &["b1"]);
        fs::write(paths.media_file("a"), b"audio").expect("seed media");

        let summary = run(
            EncodeJob {
                deck_id: 7,
                deck_name: "media",
                save_path: dir.path(),
                paths: &paths,
                template: template(1),
                transformer: &IdentityTransformer,
                writer: &JsonPackageWriter,
            },
            &entries(&["a", "b"]),
        )
        .expect("encode");
        assert_eq!(summary.missing_media, 1);

        let body =
            fs::read_to_string(dir.path().join("7_media.deck.json")).expect("read artifact");
        let value: serde_json::Value = serde_json::from_str(&body).expect("parse artifact");
        let media = value["media_files"].as_array().expect("media array");
        assert_eq!(media.len(), 1);
        assert!(media[0].as_str().expect("path").ends_with("a.mp3"));
    }

    #[test]
    fn check_reports_missing_identifiers_in_index_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths::under(dir.path());
        paths.ensure().expect("ensure stores");
        seed(&paths, "B", &["b"]);
        seed(&paths, "D", &["d"]);

        let save = dir.path().join("reports");
        check(&paths, &entries(&["A", "B", "C", "D"]), &save).expect("check");

        let metadata_report =
            fs::read_to_string(save.join("metadata_broken.txt")).expect("read report");
        assert_eq!(metadata_report, "A\nC\n");
        // No media was seeded at all.
        let media_report = fs::read_to_string(save.join("media_broken.txt")).expect("read report");
        assert_eq!(media_report, "A\nB\nC\nD\n");
    }
}
