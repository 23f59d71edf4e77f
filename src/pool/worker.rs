//! Fixed-size worker pool executing deletion units
//!
//! Each worker:
//! - Blocks on the shared task queue
//! - Runs one unit at a time, outside the queue lock
//! - Survives units that panic
//! - Exits once the queue is stopped and drained
//!
//! A pool is single-use: after [`WorkerPool::stop`] it accepts no more work
//! and cannot be restarted. Dropping a pool stops it, so no worker thread
//! ever outlives the pool that spawned it.

use crate::error::{PoolError, PoolResult};
use crate::pool::queue::TaskQueue;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, trace, warn};

/// A deferred, independently executable piece of deletion work
pub type DeletionUnit = Box<dyn FnOnce() + Send + 'static>;

/// Statistics collected by the pool's workers
#[derive(Debug, Default)]
pub struct PoolStats {
    /// Units accepted by `submit`
    pub submitted: AtomicU64,

    /// Units run to completion
    pub executed: AtomicU64,

    /// Units that panicked
    pub panicked: AtomicU64,
}

impl PoolStats {
    fn record_submit(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    fn record_executed(&self) {
        self.executed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_panic(&self) {
        self.panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Units that have finished, successfully or not
    pub fn finished(&self) -> u64 {
        self.executed.load(Ordering::Relaxed) + self.panicked.load(Ordering::Relaxed)
    }
}

/// A worker thread handle
struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(
        id: usize,
        queue: Arc<TaskQueue<DeletionUnit>>,
        stats: Arc<PoolStats>,
    ) -> PoolResult<Self> {
        let handle = thread::Builder::new()
            .name(format!("rm-worker-{}", id))
            .spawn(move || worker_loop(id, queue, stats))
            .map_err(|e| PoolError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    fn join(mut self) -> PoolResult<()> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| PoolError::Panicked { id: self.id }),
            None => Ok(()),
        }
    }
}

/// Bounded set of long-lived worker threads fed by a [`TaskQueue`]
pub struct WorkerPool {
    queue: Arc<TaskQueue<DeletionUnit>>,
    workers: Vec<Worker>,
    stats: Arc<PoolStats>,
}

impl WorkerPool {
    /// Spawn a pool with `worker_count` threads (at least one)
    pub fn new(worker_count: usize) -> PoolResult<Self> {
        let mut pool = Self {
            queue: Arc::new(TaskQueue::new()),
            workers: Vec::with_capacity(worker_count.max(1)),
            stats: Arc::new(PoolStats::default()),
        };

        // On a spawn failure the partially built pool is dropped, which
        // stops and joins the workers spawned so far.
        for id in 0..worker_count.max(1) {
            let worker = Worker::spawn(id, Arc::clone(&pool.queue), Arc::clone(&pool.stats))?;
            pool.workers.push(worker);
        }

        debug!(count = pool.workers.len(), "Worker pool started");
        Ok(pool)
    }

    /// Queue a unit for execution by one worker
    ///
    /// Never blocks. Fails only after the pool has been stopped.
    pub fn submit<F>(&self, unit: F) -> PoolResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue
            .push(Box::new(unit))
            .map_err(|_| PoolError::Stopped)?;
        self.stats.record_submit();
        Ok(())
    }

    /// Drain the queue, then stop and join every worker
    ///
    /// Idempotent. Blocks until all units queued before the call have run.
    pub fn stop(&mut self) {
        if self.workers.is_empty() {
            return;
        }

        trace!(pending = self.queue.len(), "Draining worker pool");
        self.queue.stop();

        for worker in self.workers.drain(..) {
            if let Err(e) = worker.join() {
                warn!(error = %e, "Worker failed to join cleanly");
            }
        }

        debug!(
            finished = self.stats.finished(),
            panicked = self.stats.panicked.load(Ordering::Relaxed),
            rejected = self.queue.stats().rejected_count(),
            "Worker pool stopped"
        );
    }

    /// Number of live workers (zero once stopped)
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Get pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Main worker loop
fn worker_loop(id: usize, queue: Arc<TaskQueue<DeletionUnit>>, stats: Arc<PoolStats>) {
    trace!(worker = id, "Worker starting");

    while let Some(unit) = queue.pop() {
        match panic::catch_unwind(AssertUnwindSafe(unit)) {
            Ok(()) => stats.record_executed(),
            Err(payload) => {
                stats.record_panic();
                error!(
                    worker = id,
                    reason = panic_message(payload.as_ref()),
                    "Deletion unit panicked"
                );
            }
        }
    }

    trace!(worker = id, "Worker exiting");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn test_pool_runs_every_unit() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut pool = WorkerPool::new(4).unwrap();
        assert_eq!(pool.worker_count(), 4);

        for _ in 0..1000 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        }

        pool.stop();
        assert_eq!(counter.load(Ordering::Relaxed), 1000);
        assert_eq!(pool.stats().executed.load(Ordering::Relaxed), 1000);
        assert_eq!(pool.worker_count(), 0);
    }

    #[test]
    fn test_stop_waits_for_slow_units() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut pool = WorkerPool::new(2).unwrap();

        for _ in 0..6 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                thread::sleep(Duration::from_millis(20));
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        }

        pool.stop();
        assert_eq!(counter.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn test_stop_is_idempotent_and_rejects_work() {
        let mut pool = WorkerPool::new(2).unwrap();
        pool.stop();
        pool.stop();

        assert_eq!(pool.worker_count(), 0);
        assert!(matches!(pool.submit(|| {}), Err(PoolError::Stopped)));
    }

    #[test]
    fn test_panicking_unit_does_not_kill_worker() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut pool = WorkerPool::new(1).unwrap();

        pool.submit(|| panic!("unit failure")).unwrap();
        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        }

        pool.stop();
        assert_eq!(counter.load(Ordering::Relaxed), 10);
        assert_eq!(pool.stats().panicked.load(Ordering::Relaxed), 1);
        assert_eq!(pool.stats().finished(), 11);
    }

    #[test]
    fn test_drop_drains_pool() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(3).unwrap();
            for _ in 0..50 {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                })
                .unwrap();
            }
        }
        assert_eq!(counter.load(Ordering::Relaxed), 50);
    }

    #[test]
    fn test_zero_workers_clamped_to_one() {
        let mut pool = WorkerPool::new(0).unwrap();
        assert_eq!(pool.worker_count(), 1);
        pool.stop();
    }
}
