//! Parallel removal of a directory tree
//!
//! The walk happens in two phases:
//! 1. A single depth-first enumeration submits one unlink unit per
//!    non-directory entry to a fresh [`WorkerPool`].
//! 2. Once the pool has drained, the remaining directory scaffolding is
//!    removed single-threaded, since a parent can only go after its children.
//!
//! Per-entry failures never abort the walk. They are logged, sent to the
//! failure channel and returned in [`TreeOutcome::failures`].

use crate::outcome::{EntryFailure, TreeOutcome};
use crate::pool::WorkerPool;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Primitive used to unlink a single non-directory entry
type RemoveFn = fn(&Path) -> io::Result<()>;

/// Removes directory trees using a per-tree worker pool
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker {
    worker_count: usize,
    remove_entry: RemoveFn,
}

impl TreeWalker {
    /// Create a walker that spawns `worker_count` threads per tree
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
            remove_entry: |path| fs::remove_file(path),
        }
    }

    /// Replace the per-entry unlink primitive
    #[cfg(test)]
    pub(crate) fn with_remover(mut self, remove_entry: RemoveFn) -> Self {
        self.remove_entry = remove_entry;
        self
    }

    /// Remove `root` and everything beneath it
    ///
    /// `root` itself is never followed if it is a symlink.
    pub fn remove(&self, root: &Path) -> TreeOutcome {
        let start = Instant::now();

        let mut pool = match WorkerPool::new(self.worker_count) {
            Ok(pool) => pool,
            Err(e) => {
                return TreeOutcome {
                    error: Some(e.to_string()),
                    ..TreeOutcome::default()
                }
            }
        };

        let (failure_tx, failure_rx) = unbounded();
        let unlinked = Arc::new(AtomicU64::new(0));
        let mut dirs: u64 = 0;

        let walk = WalkDir::new(root)
            .follow_links(false)
            .follow_root_links(false);

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    report_failure(&failure_tx, path, e.to_string());
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                dirs += 1;
                continue;
            }

            let path = entry.into_path();
            let display = path.display().to_string();
            let unit = unlink_unit(
                path,
                self.remove_entry,
                Arc::clone(&unlinked),
                failure_tx.clone(),
            );
            if let Err(e) = pool.submit(unit) {
                report_failure(&failure_tx, display, e.to_string());
            }
        }

        // Drain-then-stop: every submitted unlink has run after this
        pool.stop();
        drop(failure_tx);

        let failures = collect_failures(&failure_rx);
        let unlinked = unlinked.load(Ordering::Relaxed);

        let error = match fs::remove_dir_all(root) {
            Ok(()) => None,
            Err(e) => Some(e.to_string()),
        };

        let removed = if error.is_none() {
            unlinked + dirs
        } else {
            unlinked
        };

        debug!(
            root = %root.display(),
            files = unlinked,
            dirs = dirs,
            partial_failures = failures.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Tree removal finished"
        );

        TreeOutcome {
            removed,
            failures,
            error,
        }
    }
}

/// Build the unit that unlinks a single entry
fn unlink_unit(
    path: PathBuf,
    remove_entry: RemoveFn,
    unlinked: Arc<AtomicU64>,
    failures: Sender<EntryFailure>,
) -> impl FnOnce() + Send + 'static {
    move || match remove_entry(&path) {
        Ok(()) => {
            unlinked.fetch_add(1, Ordering::Relaxed);
        }
        Err(e) => report_failure(&failures, path.display().to_string(), e.to_string()),
    }
}

fn report_failure(failures: &Sender<EntryFailure>, path: String, reason: String) {
    warn!(path = %path, reason = %reason, "Failed to remove entry");
    // The receiver outlives every sender, so a send cannot fail here
    let _ = failures.send(EntryFailure { path, reason });
}

fn collect_failures(failures: &Receiver<EntryFailure>) -> Vec<EntryFailure> {
    let mut collected: Vec<EntryFailure> = failures.try_iter().collect();
    collected.sort_by(|a, b| a.path.cmp(&b.path));
    collected
}
