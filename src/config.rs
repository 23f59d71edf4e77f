//! Configuration types for fastrm
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;

/// Maximum reasonable worker count (per tree) and outer job limit
pub const MAX_WORKERS: usize = 1024;

/// Delete files and directory trees in parallel
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fastrm",
    version,
    about = "Delete files and directory trees in parallel",
    long_about = "Deletes every PATH given on the command line. Independent paths are \
                  processed concurrently; the files inside each directory tree are \
                  unlinked by a pool of worker threads before the empty directory \
                  structure is removed.\n\n\
                  Paths are taken literally. Symbolic links are removed, never followed.",
    after_help = "EXAMPLES:\n    \
        fastrm build/ target/ node_modules/\n    \
        fastrm -w 64 /scratch/huge_tree\n    \
        fastrm --strict old.log cache/  # exit non-zero if anything failed"
)]
pub struct CliArgs {
    /// Paths to delete (files, symlinks or directories)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Worker threads used inside each directory tree
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Maximum number of top-level paths processed at once
    #[arg(
        short = 'j',
        long,
        default_value_t = default_jobs(),
        value_name = "NUM"
    )]
    pub jobs: usize,

    /// Quiet mode - only report failures and the summary
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Exit with a non-zero status if any path failed
    #[arg(long)]
    pub strict: bool,
}

fn default_workers() -> usize {
    // Unlink is syscall bound, so oversubscribe the cores
    (num_cpus::get() * 5).min(MAX_WORKERS)
}

fn default_jobs() -> usize {
    (num_cpus::get() * 4).min(MAX_WORKERS)
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Paths to delete, in input order
    pub paths: Vec<String>,

    /// Worker threads per directory tree
    pub worker_count: usize,

    /// Outer in-flight cap
    pub job_limit: usize,

    /// Suppress success lines
    pub quiet: bool,

    /// Verbose logging
    pub verbose: bool,

    /// Reflect per-path failures in the exit code
    pub strict: bool,
}

impl DeleteConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.paths.is_empty() {
            return Err(ConfigError::NoPaths);
        }

        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        if args.jobs == 0 || args.jobs > MAX_WORKERS {
            return Err(ConfigError::InvalidJobLimit {
                count: args.jobs,
                max: MAX_WORKERS,
            });
        }

        Ok(Self {
            paths: args.paths,
            worker_count: args.workers,
            job_limit: args.jobs,
            quiet: args.quiet,
            verbose: args.verbose,
            strict: args.strict,
        })
    }

    /// Configuration for the given paths with default concurrency
    pub fn for_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            worker_count: default_workers(),
            job_limit: default_jobs(),
            quiet: false,
            verbose: false,
            strict: false,
        }
    }
}
