//! Card templates: the ordered field schema plus presentation resources.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A named, ordered schema of card fields with its presentation resources.
///
/// Arity is fixed at construction; every row entering a deck must match it
/// exactly. Presentation resources are loaded eagerly so a bad formats path
/// fails before any work dispatches.
#[derive(Debug, Clone, Serialize)]
pub struct FieldTemplate {
    pub id: i64,
    pub name: String,
    pub fields: Vec<String>,
    pub front: String,
    pub back: String,
    pub style: String,
}

impl FieldTemplate {
    pub fn load(
        id: i64,
        name: &str,
        fields: &[&str],
        front_path: &Path,
        back_path: &Path,
        style_path: &Path,
    ) -> Result<Self> {
        if fields.is_empty() {
            return Err(anyhow!("template {name:?} has no fields"));
        }
        let front = read_resource(front_path, "front layout")?;
        let back = read_resource(back_path, "back layout")?;
        let style = read_resource(style_path, "style")?;
        Ok(Self {
            id,
            name: name.to_string(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
            front,
            back,
            style,
        })
    }

    /// The single invariant every downstream row must satisfy.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }
}

fn read_resource(path: &Path, label: &str) -> Result<String> {
    if !path.is_file() {
        return Err(anyhow!("{label} {} is not a file", path.display()));
    }
    fs::read_to_string(path).with_context(|| format!("read {label} {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn resource(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("create resource");
        file.write_all(content.as_bytes()).expect("write resource");
        path
    }

    #[test]
    fn loads_resources_and_fixes_arity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let front = resource(dir.path(), "front.html", "{{Front}}");
        let back = resource(dir.path(), "back.html", "{{Back}}");
        let style = resource(dir.path(), "style.css", ".card {}");

        let template = FieldTemplate::load(1001, "Note", &["word", "back"], &front, &back, &style)
            .expect("load template");
        assert_eq!(template.arity(), 2);
        assert_eq!(template.front, "{{Front}}");
        assert_eq!(template.style, ".card {}");
    }

    #[test]
    fn missing_resource_fails_fast() {
        let dir = tempfile::tempdir().expect("tempdir");
        let front = resource(dir.path(), "front.html", "{{Front}}");
        let back = resource(dir.path(), "back.html", "{{Back}}");
        let missing = dir.path().join("style.css");

        let err = FieldTemplate::load(1001, "Note", &["word"], &front, &back, &missing)
            .expect_err("missing style must fail");
        assert!(err.to_string().contains("style"));
    }
}
