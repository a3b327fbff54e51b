//! # scalepool
//!
//! A bounded, self-scaling task-execution pool for Tokio: a set of concurrent
//! workers that consumes items from an external source, buffers them in a
//! fixed-capacity queue, and runs a user-supplied async work function on each
//! item, growing the worker set under sustained backlog and shrinking it again
//! through per-worker idle-timeout retirement.
//!
//! ## Architecture
//!
//! ```text
//! TaskSource → Input Bridge → BoundedQueue → Worker(s) → work function
//!                                  ▲
//!                     Scaling Controller (grows workers on backlog)
//! ```
//!
//! ## Core Features
//!
//! - **Backpressure**: a fixed-capacity queue between ingestion and execution;
//!   the bridge blocks instead of dropping when the queue is full
//! - **Proportional scale-up**: backlog past a configurable threshold adds
//!   workers in proportion to queue saturation, up to `max_workers`
//! - **Idle retirement**: workers above `min_workers` retire themselves after
//!   an idle timeout; the pool never drops below its floor
//! - **Graceful shutdown**: one shared [`CancellationToken`], idempotent
//!   [`stop`](WorkerPool::stop), and [`join`](WorkerPool::join) that waits for
//!   every worker generation and the bridge
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scalepool::{PoolConfig, WorkerPool};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, rx) = mpsc::channel::<u64>(128);
//!     let pool = WorkerPool::new(PoolConfig::default(), rx, |_cancel, item| async move {
//!         println!("processing {item}");
//!     });
//!
//!     for i in 0..100 {
//!         tx.send(i).await.unwrap();
//!     }
//!     drop(tx); // source exhausted, pool drains and workers exit
//!     pool.join().await;
//! }
//! ```
//!
//! Task ordering across workers, per-task results, and retry of failed tasks
//! are explicitly out of scope; the work function owns its own error recovery.

pub mod config;
pub mod error;
pub mod pool;
pub mod queue;
pub mod source;

pub(crate) mod bridge;
pub(crate) mod scaling;
pub(crate) mod worker;

// Re-export main types
pub use config::PoolConfig;
pub use error::{PoolError, Result};
pub use pool::WorkerPool;
pub use source::TaskSource;

// Re-exported so work functions can name their cancellation argument without
// depending on tokio-util directly.
pub use tokio_util::sync::CancellationToken;
