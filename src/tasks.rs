//! Task selection: one startup-time choice of template + transformer pairing.

use anyhow::Result;
use clap::ValueEnum;
use std::path::Path;

use crate::template::FieldTemplate;
use crate::transform::{GenerationTransformer, SliceTransformer, WebTransformer};

/// Which source/template pairing a run works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Task {
    /// Records acquired from the dictionary web source.
    Web,
    /// Records acquired from the completion backend.
    Generation,
}

impl Task {
    fn dir_name(self) -> &'static str {
        match self {
            Task::Web => "web",
            Task::Generation => "generation",
        }
    }

    /// Load this task's template, failing fast on missing presentation files.
    pub fn template(self, formats_dir: &Path) -> Result<FieldTemplate> {
        let dir = formats_dir.join(self.dir_name());
        let (id, name, fields): (i64, &str, &[&str]) = match self {
            Task::Web => (
                1001,
                "DeckforgeWebNote",
                &[
                    "word",
                    "pronunciation",
                    "overview",
                    "tags",
                    "translations",
                    "examples",
                    "notes",
                    "schema",
                ],
            ),
            Task::Generation => (
                1002,
                "DeckforgeGenerationNote",
                &["word", "pronunciation", "definition", "notes", "schema"],
            ),
        };
        FieldTemplate::load(
            id,
            name,
            fields,
            &dir.join("front.html"),
            &dir.join("back.html"),
            &dir.join("style.css"),
        )
    }

    pub fn transformer(self) -> Box<dyn SliceTransformer> {
        match self {
            Task::Web => Box::new(WebTransformer),
            Task::Generation => Box::new(GenerationTransformer),
        }
    }
}
