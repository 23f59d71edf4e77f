//! fastrm - Parallel File and Directory Tree Deletion
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use fastrm::config::{CliArgs, DeleteConfig};
use fastrm::report::ConsoleReporter;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit status when `--strict` is set and any path failed
const EXIT_PATH_FAILURES: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    // Parse CLI arguments. Invalid options exit 1, keeping 2 for --strict
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return Ok(if e.exit_code() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
    };

    // Setup logging
    setup_logging(args.verbose)?;

    // Nothing to delete is a usage error
    if args.paths.is_empty() {
        eprintln!("{}", CliArgs::command().render_usage());
        return Ok(ExitCode::FAILURE);
    }

    // Validate and create config
    let config = DeleteConfig::from_args(args).context("Invalid configuration")?;

    info!(
        paths = config.paths.len(),
        workers = config.worker_count,
        jobs = config.job_limit,
        "Starting deletion"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    let reporter = ConsoleReporter::new(config.quiet);
    let summary = runtime
        .block_on(fastrm::run(&config, &reporter))
        .context("Deletion aborted")?;

    if config.strict && !summary.all_succeeded() {
        info!(failed = summary.failed, "Exiting with failure status");
        return Ok(ExitCode::from(EXIT_PATH_FAILURES));
    }

    Ok(ExitCode::SUCCESS)
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("fastrm=debug,warn")
    } else {
        EnvFilter::new("fastrm=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
