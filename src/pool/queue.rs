//! Task queue for deferred deletion units
//!
//! An unbounded FIFO guarded by a single lock. `push` never blocks on
//! capacity; `pop` blocks until an item is available or the queue has been
//! stopped and drained. Stopping is drain-then-stop: items already queued
//! are still handed out after [`TaskQueue::stop`], new items are refused.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Statistics for the task queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total items enqueued
    pub enqueued: AtomicU64,

    /// Total items dequeued
    pub dequeued: AtomicU64,

    /// Pushes refused because the queue was stopped
    pub rejected: AtomicU64,
}

impl QueueStats {
    /// Get number of refused pushes
    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// Multi-producer, multi-consumer FIFO with blocking pop
pub struct TaskQueue<T> {
    items: Mutex<VecDeque<T>>,

    /// Signalled when an item is pushed or the queue is stopped
    available: Condvar,

    stopped: AtomicBool,

    stats: QueueStats,
}

impl<T> TaskQueue<T> {
    /// Create an empty, running queue
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            stopped: AtomicBool::new(false),
            stats: QueueStats::default(),
        }
    }

    /// Enqueue an item and wake one waiting consumer
    ///
    /// Returns the item back if the queue has been stopped.
    pub fn push(&self, item: T) -> Result<(), T> {
        let mut items = self.items.lock();

        // Checked under the lock so an item can never slip in after the
        // last consumer observed "stopped and empty".
        if self.stopped.load(Ordering::Acquire) {
            drop(items);
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(item);
        }

        items.push_back(item);
        drop(items);

        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        self.available.notify_one();
        Ok(())
    }

    /// Dequeue an item, blocking while the queue is empty
    ///
    /// Returns `None` only once the queue is stopped and fully drained.
    pub fn pop(&self) -> Option<T> {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop_front() {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                return Some(item);
            }
            if self.stopped.load(Ordering::Acquire) {
                return None;
            }
            self.available.wait(&mut items);
        }
    }

    /// Dequeue an item without blocking
    pub fn try_pop(&self) -> Option<T> {
        let item = self.items.lock().pop_front();
        if item.is_some() {
            self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
        }
        item
    }

    /// Refuse further pushes and wake every waiting consumer
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);

        // Taking the lock orders this wakeup after any consumer that checked
        // the flag and is about to wait.
        let _items = self.items.lock();
        self.available.notify_all();
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_queue_fifo() {
        let queue = TaskQueue::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert!(queue.is_empty());
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_stop_drains_then_ends() {
        let queue = TaskQueue::new();
        queue.push("a").unwrap();
        queue.push("b").unwrap();
        queue.stop();

        // Refused after stop
        assert_eq!(queue.push("c"), Err("c"));
        assert_eq!(queue.stats().rejected_count(), 1);

        // Already queued items still come out
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_stop_wakes_blocked_consumer() {
        let queue: Arc<TaskQueue<u32>> = Arc::new(TaskQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };

        thread::sleep(Duration::from_millis(50));
        queue.stop();

        assert_eq!(consumer.join().unwrap(), None);
    }

    #[test]
    fn test_push_wakes_blocked_consumer() {
        let queue: Arc<TaskQueue<u32>> = Arc::new(TaskQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };

        thread::sleep(Duration::from_millis(50));
        queue.push(7).unwrap();

        assert_eq!(consumer.join().unwrap(), Some(7));
    }

    #[test]
    fn test_queue_stats() {
        let queue = TaskQueue::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.pop();
        queue.pop();

        let stats = queue.stats();
        assert_eq!(stats.enqueued.load(Ordering::Relaxed), 2);
        assert_eq!(stats.dequeued.load(Ordering::Relaxed), 2);
    }
}
