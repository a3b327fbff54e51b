//! Input bridge — relays items from the external source into the bounded queue
//!
//! The bridge never drops an item while running, with one documented
//! exception: if a stop request arrives while an enqueue is blocked on a full
//! queue, that single in-flight item is abandoned so shutdown cannot hang.

use crate::pool::PoolShared;
use crate::source::TaskSource;
use std::sync::Arc;

/// Run the bridge until the source is exhausted or the pool is cancelled.
///
/// Exhaustion closes the queue so workers drain the remaining items and exit;
/// cancellation exits without closing, since workers observe the cancellation
/// signal directly.
pub(crate) async fn run<T: Send + 'static>(
    mut source: Box<dyn TaskSource<T>>,
    shared: Arc<PoolShared<T>>,
) {
    loop {
        tokio::select! {
            biased;

            () = shared.cancel.cancelled() => {
                tracing::debug!("Input bridge cancelled");
                return;
            }
            item = source.next_task() => {
                let Some(item) = item else {
                    tracing::debug!("Input source exhausted, closing queue");
                    shared.queue.close();
                    return;
                };
                // The enqueue itself races cancellation so a full queue cannot
                // wedge the bridge after a stop request. Losing the one
                // in-flight item here is the accepted cost of explicit stop.
                tokio::select! {
                    biased;

                    () = shared.cancel.cancelled() => {
                        tracing::debug!("Input bridge cancelled during enqueue, in-flight item abandoned");
                        return;
                    }
                    result = shared.queue.push(item) => {
                        if result.is_err() {
                            // Only the bridge closes the queue, so this is
                            // unreachable in practice; bail out regardless.
                            tracing::warn!("Task queue closed underneath the input bridge");
                            return;
                        }
                    }
                }
            }
        }
    }
}
