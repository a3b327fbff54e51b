//! Scaling controller — periodic decision loop that grows the worker set under backlog
//!
//! Each tick compares queue backlog against `queue_capacity * scale_threshold
//! / 100`. Once the threshold is crossed, the number of workers added is
//! proportional to how saturated the queue is beyond it: at least one, more as
//! the backlog approaches full capacity, never past `max_workers`. Shrinking
//! is not this controller's job — idle workers retire themselves.

use crate::pool::PoolShared;
use crate::worker;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio_util::task::TaskTracker;

/// Compute how many workers to add for the given snapshot.
///
/// Returns 0 while the backlog is below the threshold or the pool is already
/// at `max_workers`. The snapshot is point-in-time; races with concurrent
/// enqueue/dequeue/worker-exit self-correct on the next tick.
pub(crate) fn workers_to_add(
    queue_len: usize,
    queue_capacity: usize,
    scale_threshold: u32,
    current: usize,
    max_workers: usize,
) -> usize {
    let threshold = queue_capacity * scale_threshold as usize / 100;
    if queue_len < threshold || current >= max_workers {
        return 0;
    }

    // How far past the threshold the backlog is, as a fraction of the furthest
    // it could be. threshold == capacity (100%) means any crossing is full
    // saturation.
    let max_excess = queue_capacity - threshold;
    let ratio = if max_excess == 0 {
        1.0
    } else {
        (queue_len - threshold) as f64 / max_excess as f64
    };

    let headroom = max_workers - current;
    let potential = (ratio * headroom as f64) as usize;
    potential.max(1).min(headroom)
}

/// Run the scaling loop until cancellation.
///
/// New workers are spawned on the shared tracker and the worker counter is
/// raised before the spawns, so no new worker can observe a stale undercount.
pub(crate) async fn run<T: Send + 'static>(shared: Arc<PoolShared<T>>, tracker: TaskTracker) {
    let period = shared.config.scale_interval;
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

    loop {
        tokio::select! {
            biased;

            () = shared.cancel.cancelled() => {
                tracing::debug!("Scaling controller cancelled");
                return;
            }
            _ = ticker.tick() => {
                let queue_len = shared.queue.len();
                let current = shared.workers.load(Ordering::SeqCst);
                let additional = workers_to_add(
                    queue_len,
                    shared.config.queue_capacity,
                    shared.config.scale_threshold,
                    current,
                    shared.config.max_workers,
                );
                if additional == 0 {
                    continue;
                }

                shared.workers.fetch_add(additional, Ordering::SeqCst);
                for _ in 0..additional {
                    tracker.spawn(worker::run(shared.clone()));
                }
                tracing::info!(
                    queue_len,
                    from = current,
                    to = current + additional,
                    "Scaled up worker pool"
                );
            }
        }
    }
}
