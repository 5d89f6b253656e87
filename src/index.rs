//! Index file parsing and rank-based filtering.
//!
//! The index is a tab-separated text file: column 0 is the identifier,
//! optional column 1 is a numeric frequency rank. A malformed rank aborts the
//! invocation; a missing rank is fine and never filtered out.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One parsed index line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub identifier: String,
    pub rank: Option<u32>,
}

/// Rank cutoff with an explicit boundary.
///
/// The boundary is a parameter because the two historical call sites
/// disagreed on `<` vs `<=`; callers must say which they mean.
#[derive(Debug, Clone, Copy)]
pub struct RankCutoff {
    pub max_rank: u32,
    pub inclusive: bool,
}

impl RankCutoff {
    fn admits(&self, rank: u32) -> bool {
        if self.inclusive {
            rank <= self.max_rank
        } else {
            rank < self.max_rank
        }
    }
}

/// Parse an index file into entries, preserving file order.
pub fn load_index(path: &Path) -> Result<Vec<IndexEntry>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read index {}", path.display()))?;
    let mut entries = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut columns = line.split('\t');
        let identifier = columns.next().unwrap_or_default().trim();
        if identifier.is_empty() {
            continue;
        }
        let rank = match columns.next().map(str::trim).filter(|col| !col.is_empty()) {
            Some(raw) => Some(raw.parse::<u32>().with_context(|| {
                format!("index {} line {}: bad rank {raw:?}", path.display(), line_no + 1)
            })?),
            None => None,
        };
        entries.push(IndexEntry {
            identifier: identifier.to_string(),
            rank,
        });
    }
    Ok(entries)
}

/// Drop entries whose rank falls outside the cutoff. Unranked entries pass.
pub fn filter_by_rank(entries: Vec<IndexEntry>, cutoff: Option<RankCutoff>) -> Vec<IndexEntry> {
    let Some(cutoff) = cutoff else {
        return entries;
    };
    entries
        .into_iter()
        .filter(|entry| entry.rank.is_none_or(|rank| cutoff.admits(rank)))
        .collect()
}
