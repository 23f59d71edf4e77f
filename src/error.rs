//! Error types for fastrm
//!
//! This module defines the error hierarchy for:
//! - Worker pool lifecycle errors
//! - Configuration and CLI errors
//! - Outer task scheduling errors
//!
//! Pool and configuration errors are handled where they occur (the tree
//! walker turns a pool error into outcome data, the binary reports a
//! configuration error), so [`RmError`] only covers the outer tasks.
//!
//! Deletion failures themselves are not errors at this level: they are
//! converted into [`PathOutcome`](crate::outcome::PathOutcome) data by the
//! path deleter. Only conditions that prevent a run from producing its
//! outcomes surface as [`RmError`].

use thiserror::Error;

/// Top-level error type for the fastrm application
#[derive(Error, Debug)]
pub enum RmError {
    /// An outer deletion task did not complete
    #[error("Deletion task for '{path}' failed: {reason}")]
    TaskFailed { path: String, reason: String },
}

/// Worker pool errors
#[derive(Error, Debug)]
pub enum PoolError {
    /// Unit submitted after stop
    #[error("Worker pool is stopped and no longer accepts work")]
    Stopped,

    /// Worker thread could not be spawned
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },

    /// Worker thread panicked outside of a unit
    #[error("Worker {id} panicked")]
    Panicked { id: usize },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid outer job limit
    #[error("Invalid job limit {count}: must be between 1 and {max}")]
    InvalidJobLimit { count: usize, max: usize },

    /// No paths given
    #[error("No paths given")]
    NoPaths,
}

/// Result type alias for RmError
pub type Result<T> = std::result::Result<T, RmError>;

/// Result type alias for PoolError
pub type PoolResult<T> = std::result::Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_failed_message() {
        let err = RmError::TaskFailed {
            path: "build".into(),
            reason: "task 3 panicked".into(),
        };
        assert_eq!(
            err.to_string(),
            "Deletion task for 'build' failed: task 3 panicked"
        );
    }

    #[test]
    fn test_pool_error_message() {
        let err = PoolError::SpawnFailed {
            id: 7,
            reason: "Resource temporarily unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to spawn worker 7: Resource temporarily unavailable"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::InvalidWorkerCount { count: 0, max: 1024 };
        assert_eq!(
            err.to_string(),
            "Invalid worker count 0: must be between 1 and 1024"
        );
    }
}
