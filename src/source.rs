//! Task sources — the external feed a pool ingests from
//!
//! The pool only ever reads from its source; pacing and buffering on the
//! producer side are the caller's concern.

use async_trait::async_trait;
use tokio::sync::mpsc;

/// A producer of task items consumed by the pool's input bridge.
///
/// Implementations must resolve to `None` exactly once the source is
/// exhausted, and `next_task` must be cancel safe: the bridge races it against
/// cancellation, and dropping the unresolved future must not lose an item.
/// Both Tokio mpsc receiver flavors satisfy this out of the box.
#[async_trait]
pub trait TaskSource<T>: Send {
    /// Wait for the next item, or `None` when the source is exhausted
    async fn next_task(&mut self) -> Option<T>;
}

#[async_trait]
impl<T: Send> TaskSource<T> for mpsc::Receiver<T> {
    async fn next_task(&mut self) -> Option<T> {
        self.recv().await
    }
}

#[async_trait]
impl<T: Send> TaskSource<T> for mpsc::UnboundedReceiver<T> {
    async fn next_task(&mut self) -> Option<T> {
        self.recv().await
    }
}
