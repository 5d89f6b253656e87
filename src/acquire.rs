//! Acquisition stage: fetch raw entries concurrently and persist them.
//!
//! Each identifier is an independent unit of work writing its own record
//! file, so workers share nothing beyond the dispatch queue and a progress
//! counter. Completed records double as resume markers for later runs.

use anyhow::Result;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::index::IndexEntry;
use crate::source::ContentSource;
use crate::store::{self, StorePaths};

/// End-of-run accounting for one acquisition batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AcquireSummary {
    pub written: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Acquisition settings beyond the source itself.
pub struct AcquireOptions {
    pub concurrency: usize,
    pub overwrite: bool,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            overwrite: false,
        }
    }
}

/// Fetch and persist records for every pending identifier.
///
/// A single identifier's failure never aborts the batch; a partial run
/// leaves exactly the resumable state a subsequent run picks up.
pub fn run<S: ContentSource + ?Sized>(
    source: &S,
    paths: &StorePaths,
    entries: &[IndexEntry],
    options: &AcquireOptions,
) -> Result<AcquireSummary> {
    paths.ensure()?;

    let mut pending = Vec::new();
    let mut skipped = 0usize;
    for entry in entries {
        if !options.overwrite && paths.has_record(&entry.identifier) {
            skipped += 1;
        } else {
            pending.push(entry.identifier.clone());
        }
    }
    let total = pending.len();
    tracing::info!(
        pending = total,
        skipped,
        concurrency = options.concurrency,
        "starting acquisition"
    );

    let queue = Mutex::new(VecDeque::from(pending));
    let done = AtomicUsize::new(0);
    let written = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let workers = options.concurrency.max(1);

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let identifier = {
                    let mut queue = queue.lock().expect("acquisition queue poisoned");
                    queue.pop_front()
                };
                let Some(identifier) = identifier else {
                    break;
                };
                match source.fetch(&identifier) {
                    Ok(segments) => match store::write_record(paths, &identifier, &segments) {
                        Ok(()) => {
                            written.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(err) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                            tracing::error!(%identifier, error = %err, "record write failed");
                        }
                    },
                    Err(err) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        tracing::error!(
                            %identifier,
                            attempts = err.attempts,
                            error = %err.last_error,
                            "fetch failed, skipping"
                        );
                    }
                }
                let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::info!(completed, total, %identifier, "progress");
            });
        }
    });

    let summary = AcquireSummary {
        written: written.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
        skipped,
    };
    tracing::info!(
        written = summary.written,
        failed = summary.failed,
        skipped = summary.skipped,
        "acquisition finished"
    );
    Ok(summary)
}
