//! Outcome types reported for deleted paths

use std::fmt;

/// Result of deleting one top-level input path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOutcome {
    /// The path exactly as supplied
    pub path: String,

    /// Whether the path is gone
    pub success: bool,

    /// Human-readable description of what happened
    pub message: String,

    /// Entries removed (1 for a file, entries plus directories for a tree)
    pub removed: u64,

    /// Entries inside a tree that could not be removed or enumerated
    pub failures: Vec<EntryFailure>,
}

impl PathOutcome {
    /// The path did not exist when classified
    pub fn not_found(path: &str) -> Self {
        Self::failed(path, format!("path does not exist: {}", path))
    }

    /// A single file or symlink was unlinked
    pub fn removed_file(path: &str) -> Self {
        Self {
            path: path.to_string(),
            success: true,
            message: format!("removed file: {}", path),
            removed: 1,
            failures: Vec::new(),
        }
    }

    /// Generic failure carrying an error message
    pub fn failed(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            success: false,
            message: message.into(),
            removed: 0,
            failures: Vec::new(),
        }
    }

    /// Outcome of a directory tree removal
    pub fn from_tree(path: &str, tree: TreeOutcome) -> Self {
        let message = match &tree.error {
            None => format!("removed {} item(s) from: {}", tree.removed, path),
            Some(error) => format!("failed to remove {}: {}", path, error),
        };

        Self {
            path: path.to_string(),
            success: tree.is_success(),
            message,
            removed: tree.removed,
            failures: tree.failures,
        }
    }

    /// Number of entries inside a tree that could not be removed
    pub fn partial_failures(&self) -> u64 {
        self.failures.len() as u64
    }
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of removing one directory tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeOutcome {
    /// Entries unlinked by workers plus directories removed
    pub removed: u64,

    /// Entries that failed to unlink or enumerate
    pub failures: Vec<EntryFailure>,

    /// Error from the final scaffolding removal, if it failed
    pub error: Option<String>,
}

impl TreeOutcome {
    /// Returns true if the root is gone
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Number of entries that failed to unlink or enumerate
    pub fn partial_failures(&self) -> u64 {
        self.failures.len() as u64
    }
}

/// A per-entry failure observed during a tree walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// Path of the entry
    pub path: String,

    /// OS error text
    pub reason: String,
}

/// Summary of a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Paths processed
    pub total: usize,

    /// Paths that are gone
    pub succeeded: usize,

    /// Paths that failed, including missing ones
    pub failed: usize,
}

impl RunSummary {
    /// Tally a set of outcomes
    pub fn from_outcomes(outcomes: &[PathOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    /// Returns true if every path was deleted
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        let missing = PathOutcome::not_found("./gone");
        assert!(!missing.success);
        assert_eq!(missing.message, "path does not exist: ./gone");

        let file = PathOutcome::removed_file("a.txt");
        assert!(file.success);
        assert_eq!(file.to_string(), "removed file: a.txt");
        assert_eq!(file.removed, 1);
    }

    #[test]
    fn test_tree_outcome_conversion() {
        let ok = PathOutcome::from_tree(
            "dir",
            TreeOutcome {
                removed: 21,
                failures: Vec::new(),
                error: None,
            },
        );
        assert!(ok.success);
        assert_eq!(ok.message, "removed 21 item(s) from: dir");

        let failed = PathOutcome::from_tree(
            "dir",
            TreeOutcome {
                removed: 9,
                failures: vec![EntryFailure {
                    path: "dir/locked/stuck".into(),
                    reason: "Permission denied (os error 13)".into(),
                }],
                error: Some("Directory not empty".into()),
            },
        );
        assert!(!failed.success);
        assert_eq!(failed.partial_failures(), 1);
        assert_eq!(failed.failures[0].path, "dir/locked/stuck");
        assert!(failed.message.contains("Directory not empty"));
    }

    #[test]
    fn test_run_summary() {
        let outcomes = vec![
            PathOutcome::removed_file("a"),
            PathOutcome::not_found("b"),
            PathOutcome::removed_file("c"),
        ];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_succeeded());
    }
}
