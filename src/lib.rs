//! fastrm - Parallel File and Directory Tree Deletion
//!
//! Deletes files, symlinks and whole directory trees given on the command
//! line, overlapping the latency of independent unlink calls.
//!
//! # Features
//!
//! - **Outer Concurrency**: every top-level path is deleted by its own task,
//!   with a cap on how many run at once. Results are reported in input order.
//!
//! - **Inner Concurrency**: inside a directory tree, each file is unlinked by
//!   a fixed pool of worker threads created for that tree alone.
//!
//! - **Best-Effort Trees**: one locked file does not stop the rest of a tree
//!   from being deleted. Such entries are logged and counted.
//!
//! # Architecture
//!
//! ```text
//!                      fastrm a.txt dir1/ dir2/
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Result Aggregator                           │
//! │      one tokio task per path, semaphore-capped, input order      │
//! └─────────┬──────────────────────┬──────────────────────┬─────────┘
//!           ▼                      ▼                      ▼
//!     ┌───────────┐          ┌───────────┐          ┌───────────┐
//!     │PathDeleter│          │PathDeleter│          │PathDeleter│
//!     │  unlink   │          │ directory │          │ directory │
//!     └───────────┘          └─────┬─────┘          └─────┬─────┘
//!                                  ▼                      ▼
//!                           ┌────────────┐         ┌────────────┐
//!                           │ TreeWalker │         │ TreeWalker │
//!                           │ WorkerPool │         │ WorkerPool │
//!                           │ (per tree) │         │ (per tree) │
//!                           └────────────┘         └────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Delete several build directories at once
//! fastrm target/ node_modules/ dist/
//!
//! # More threads for a huge tree, fail the exit code on any error
//! fastrm -w 128 --strict /scratch/old_run
//! ```

pub mod aggregate;
pub mod config;
pub mod delete;
pub mod error;
pub mod outcome;
pub mod pool;
pub mod report;

pub use aggregate::{delete_all, run};
pub use config::{CliArgs, DeleteConfig};
pub use delete::{PathDeleter, TreeWalker};
pub use error::{Result, RmError};
pub use outcome::{PathOutcome, RunSummary, TreeOutcome};
pub use pool::WorkerPool;
pub use report::{ConsoleReporter, Reporter};
