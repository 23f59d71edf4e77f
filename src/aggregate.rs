//! Outer-level concurrency across top-level paths
//!
//! One task per input path, with the number of paths being deleted at once
//! capped by a semaphore. Outcomes are awaited in submission order, so they
//! are reported and returned in input order no matter which path finishes
//! first.

use crate::config::DeleteConfig;
use crate::delete::PathDeleter;
use crate::error::{Result, RmError};
use crate::outcome::{PathOutcome, RunSummary};
use crate::report::Reporter;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Delete every configured path, reporting each outcome in input order
///
/// Returns exactly one outcome per input path. An error means an outer task
/// could not run to completion, which leaves the run without a result for
/// that path.
pub async fn delete_all<R: Reporter>(
    config: &DeleteConfig,
    reporter: &R,
) -> Result<Vec<PathOutcome>> {
    let deleter = PathDeleter::new(config.worker_count);

    // A lone directory already fans out across the worker pool
    if let [path] = config.paths.as_slice() {
        let target = path.clone();
        let inline = run_blocking(path, move || {
            PathDeleter::is_directory(&target).then(|| {
                debug!(path = %target, "Single directory, deleting inline");
                deleter.delete(&target)
            })
        })
        .await?;

        if let Some(outcome) = inline {
            reporter.report(&outcome);
            return Ok(vec![outcome]);
        }
    }

    let semaphore = Arc::new(Semaphore::new(config.job_limit.max(1)));
    let handles: Vec<(String, JoinHandle<std::result::Result<PathOutcome, String>>)> = config
        .paths
        .iter()
        .map(|path| {
            let handle = spawn_delete(deleter, path.clone(), Arc::clone(&semaphore));
            (path.clone(), handle)
        })
        .collect();

    debug!(
        tasks = handles.len(),
        job_limit = config.job_limit,
        "Deletion tasks spawned"
    );

    let mut outcomes = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let outcome = handle
            .await
            .map_err(|e| e.to_string())
            .and_then(|result| result)
            .map_err(|reason| RmError::TaskFailed { path, reason })?;

        reporter.report(&outcome);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Delete all paths, then report the run summary and elapsed time
pub async fn run<R: Reporter>(config: &DeleteConfig, reporter: &R) -> Result<RunSummary> {
    let start = Instant::now();

    let outcomes = delete_all(config, reporter).await?;
    let summary = RunSummary::from_outcomes(&outcomes);
    let elapsed = start.elapsed();

    info!(
        total = summary.total,
        failed = summary.failed,
        elapsed_ms = elapsed.as_millis() as u64,
        "Run completed"
    );

    reporter.finish(&summary, elapsed);
    Ok(summary)
}

/// Run filesystem work on the blocking pool, keeping async threads free
async fn run_blocking<T, F>(path: &str, work: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RmError::TaskFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })
}

fn spawn_delete(
    deleter: PathDeleter,
    path: String,
    semaphore: Arc<Semaphore>,
) -> JoinHandle<std::result::Result<PathOutcome, String>> {
    tokio::spawn(async move {
        let _permit = semaphore.acquire_owned().await.map_err(|e| e.to_string())?;
        tokio::task::spawn_blocking(move || deleter.delete(&path))
            .await
            .map_err(|e| e.to_string())
    })
}
