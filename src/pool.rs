//! Pool controller — owns configuration, lifecycle, and shutdown of the worker pool
//!
//! Construction wires everything together: the bounded queue, the initial
//! worker set, the input bridge, and the scaling controller. The pool exposes
//! explicit [`stop`](WorkerPool::stop), [`join`](WorkerPool::join), and
//! read-only inspection of the live worker count.

use crate::bridge;
use crate::config::PoolConfig;
use crate::queue::BoundedQueue;
use crate::scaling;
use crate::source::TaskSource;
use crate::worker;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Boxed work function invoked once per task item
pub(crate) type WorkFn<T> =
    Arc<dyn Fn(CancellationToken, T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// State shared by the pool controller, workers, input bridge, and scaling
/// controller
pub(crate) struct PoolShared<T> {
    /// Normalized configuration, immutable for the pool's lifetime
    pub(crate) config: PoolConfig,
    /// The hand-off point between the bridge and the workers
    pub(crate) queue: BoundedQueue<T>,
    /// Live worker count. Incremented only by the scaling controller,
    /// decremented exactly once by each worker on exit.
    pub(crate) workers: AtomicUsize,
    /// Shared cancellation signal, triggered at most once
    pub(crate) cancel: CancellationToken,
    /// User-supplied work function
    pub(crate) work: WorkFn<T>,
}

/// A bounded, self-scaling task-execution pool.
///
/// Items flow from the [`TaskSource`] through an internal bounded queue to a
/// dynamically sized set of workers. Dropping the pool requests shutdown the
/// same way [`stop`](Self::stop) does; call [`join`](Self::join) first for a
/// graceful drain.
pub struct WorkerPool<T> {
    shared: Arc<PoolShared<T>>,
    /// Join barrier covering the bridge and every worker generation
    tracker: TaskTracker,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Create and start a pool.
    ///
    /// Out-of-range configuration is corrected to its floors, never rejected,
    /// so construction cannot fail. The initial `min_workers` workers, the
    /// input bridge, and the scaling controller all start immediately; this
    /// must be called from within a Tokio runtime.
    ///
    /// The work function receives the pool's cancellation token and one item.
    /// Per-task results, retries, and panic recovery are its own concern — a
    /// panicking execution forfeits that worker's slot.
    pub fn new<S, F, Fut>(config: PoolConfig, source: S, work: F) -> Self
    where
        S: TaskSource<T> + 'static,
        F: Fn(CancellationToken, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let config = config.normalized();
        let work: WorkFn<T> = Arc::new(move |cancel, item| Box::pin(work(cancel, item)));

        let shared = Arc::new(PoolShared {
            queue: BoundedQueue::new(config.queue_capacity),
            workers: AtomicUsize::new(config.min_workers),
            cancel: CancellationToken::new(),
            work,
            config,
        });

        let tracker = TaskTracker::new();
        for _ in 0..shared.config.min_workers {
            tracker.spawn(worker::run(shared.clone()));
        }
        tracker.spawn(bridge::run(Box::new(source), shared.clone()));

        // The scaling loop is deliberately outside the join barrier: join
        // waits for the bridge and the workers, while this loop runs until
        // cancellation (see Drop).
        tokio::spawn(scaling::run(shared.clone(), tracker.clone()));

        // Late scale-ups still register with the closed tracker; close only
        // arms wait(), it does not freeze the set.
        tracker.close();

        tracing::info!(
            min_workers = shared.config.min_workers,
            max_workers = shared.config.max_workers,
            queue_capacity = shared.config.queue_capacity,
            scale_threshold = shared.config.scale_threshold,
            "Worker pool started"
        );

        Self { shared, tracker }
    }

    /// Request shutdown. Idempotent and non-blocking; in-flight work runs to
    /// completion but no further items are bridged or dequeued.
    pub fn stop(&self) {
        if !self.shared.cancel.is_cancelled() {
            tracing::info!("Worker pool stopping");
        }
        self.shared.cancel.cancel();
    }

    /// Wait until the input bridge and every worker — initial and scaled-up —
    /// have exited. Safe to call concurrently with ongoing scaling, more than
    /// once, and after the pool has already drained.
    pub async fn join(&self) {
        self.tracker.wait().await;
    }

    /// Current number of live workers (point-in-time snapshot)
    pub fn worker_count(&self) -> usize {
        self.shared.workers.load(Ordering::SeqCst)
    }

    /// Current backlog in the internal queue
    pub fn queue_len(&self) -> usize {
        self.shared.queue.len()
    }

    /// Whether shutdown has been requested
    pub fn is_stopped(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// The normalized configuration the pool is running with
    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }
}

impl<T> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        // Stops the detached scaling loop (and anything still draining) once
        // the handle is gone.
        self.shared.cancel.cancel();
    }
}
