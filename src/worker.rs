//! Worker loop — executes queued tasks and retires itself after sustained idleness
//!
//! Each worker waits on a single `select!` over {cancellation, next item, idle
//! timer}, so an item arrival and a timeout can never both be claimed by the
//! same wait. The idle timer is rebuilt every iteration: time spent executing
//! the work function never counts as idleness.

use crate::pool::PoolShared;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Decrements the live worker count exactly once when the owning worker
/// exits, whatever the exit path. Disarmed when the idle-retirement path has
/// already claimed the decrement atomically.
struct CountGuard<'a> {
    workers: &'a AtomicUsize,
    armed: bool,
}

impl Drop for CountGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.workers.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Run one worker until cancellation, queue exhaustion, or idle retirement.
///
/// The caller must have accounted for this worker in the shared counter
/// before spawning.
pub(crate) async fn run<T: Send + 'static>(shared: Arc<PoolShared<T>>) {
    let idle_timeout = shared.config.effective_idle_timeout();
    let min_workers = shared.config.min_workers;
    let mut guard = CountGuard {
        workers: &shared.workers,
        armed: true,
    };

    loop {
        tokio::select! {
            biased;

            () = shared.cancel.cancelled() => {
                tracing::debug!("Worker cancelled");
                return;
            }
            item = shared.queue.pop() => {
                match item {
                    // In-flight executions run to completion; cancellation is
                    // cooperative and only observed between tasks.
                    Some(task) => (shared.work)(shared.cancel.clone(), task).await,
                    None => {
                        tracing::debug!("Queue closed and drained, worker exiting");
                        return;
                    }
                }
            }
            () = tokio::time::sleep(idle_timeout) => {
                // Retire only if the pool stays at or above its floor. The
                // check and decrement are one atomic update, so two idle
                // workers can never both claim the same retirement slot.
                let retired = shared
                    .workers
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                        (count > min_workers).then(|| count - 1)
                    })
                    .is_ok();
                if retired {
                    guard.armed = false;
                    tracing::debug!("Idle worker retiring");
                    return;
                }
                // At the floor: keep waiting with a fresh timer.
            }
        }
    }
}
