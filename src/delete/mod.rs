//! Single-path deletion
//!
//! [`PathDeleter::delete`] classifies a path without following symlinks and
//! applies the matching removal primitive. Every failure is converted into a
//! [`PathOutcome`]; nothing escapes as an error.
//!
//! Paths are normalized through [`Path::components`] before use, which drops
//! trailing separators. Otherwise `link/` would resolve through the symlink
//! and the walker would empty the link's target.
//!
//! There is an unavoidable window between classifying a path and removing
//! it. If the path changes in between, the removal call fails and that
//! failure is reported like any other filesystem error.

pub mod tree;

pub use tree::TreeWalker;

use crate::outcome::PathOutcome;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Deletes one top-level path
#[derive(Debug, Clone, Copy)]
pub struct PathDeleter {
    walker: TreeWalker,
}

impl PathDeleter {
    /// Create a deleter whose directory removals use `worker_count` threads
    pub fn new(worker_count: usize) -> Self {
        Self {
            walker: TreeWalker::new(worker_count),
        }
    }

    /// Delete `path` and describe what happened
    pub fn delete(&self, path: &str) -> PathOutcome {
        let target = normalize(path);

        let metadata = match fs::symlink_metadata(&target) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return PathOutcome::not_found(path);
            }
            Err(e) => {
                return PathOutcome::failed(path, format!("failed to inspect {}: {}", path, e));
            }
        };

        if metadata.is_dir() {
            debug!(path = %path, "Removing directory tree");
            let tree = self.walker.remove(&target);
            return PathOutcome::from_tree(path, tree);
        }

        // Regular files, symlinks and special files are all a single unlink
        match fs::remove_file(&target) {
            Ok(()) => PathOutcome::removed_file(path),
            Err(e) => PathOutcome::failed(path, format!("failed to remove {}: {}", path, e)),
        }
    }

    /// Check whether `path` is a real directory (symlinks excluded)
    pub fn is_directory(path: &str) -> bool {
        fs::symlink_metadata(normalize(path))
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

/// Strip trailing separators and redundant `.` components
fn normalize(path: &str) -> PathBuf {
    Path::new(path).components().collect()
}
