//! Worker pool for intra-tree fan-out
//!
//! ```text
//!          Tree Walker (submit)
//!                  │
//!                  ▼
//!     ┌────────────────────────────┐
//!     │         TaskQueue          │
//!     │  Mutex<VecDeque> + Condvar │
//!     │  AtomicBool stop flag      │
//!     └─────────────┬──────────────┘
//!                   │ pop (blocking)
//!     ┌─────────────┼──────────────┐
//!     │             │              │
//! ┌───▼────┐   ┌────▼───┐     ┌────▼───┐
//! │Worker 0│   │Worker 1│ ... │Worker N│
//! │ unlink │   │ unlink │     │ unlink │
//! └────────┘   └────────┘     └────────┘
//! ```

pub mod queue;
pub mod worker;

pub use queue::{QueueStats, TaskQueue};
pub use worker::{DeletionUnit, PoolStats, WorkerPool};
