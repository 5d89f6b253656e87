//! Deck assembly and the packaging boundary.
//!
//! The container format is an external concern; the writer trait only
//! promises one artifact per deck, named by deck id and name.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::template::FieldTemplate;

/// Ordered, validated rows bound to one template.
#[derive(Debug, Serialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub template: FieldTemplate,
    pub rows: Vec<Vec<String>>,
}

impl Deck {
    pub fn new(id: i64, name: &str, template: FieldTemplate) -> Self {
        Self {
            id,
            name: name.to_string(),
            template,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Sink accepting a finished deck plus its media files.
pub trait PackageWriter {
    fn write(&self, deck: &Deck, media_files: &[PathBuf], save_path: &Path) -> Result<PathBuf>;
}

#[derive(Serialize)]
struct Artifact<'a> {
    deck: &'a Deck,
    media_files: Vec<String>,
}

/// Default writer emitting one JSON artifact per deck.
pub struct JsonPackageWriter;

impl PackageWriter for JsonPackageWriter {
    fn write(&self, deck: &Deck, media_files: &[PathBuf], save_path: &Path) -> Result<PathBuf> {
        let artifact = Artifact {
            deck,
            media_files: media_files
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        };
        let path = save_path.join(format!("{}_{}.deck.json", deck.id, deck.name));
        let body = serde_json::to_string_pretty(&artifact).context("serialize deck artifact")?;
        fs::write(&path, body).with_context(|| format!("write package {}", path.display()))?;
        tracing::info!(
            deck = %deck.name,
            rows = deck.rows.len(),
            media = media_files.len(),
            path = %path.display(),
            "package written"
        );
        Ok(path)
    }
}
