//! Bounded task queue — fixed-capacity FIFO hand-off between ingestion and workers
//!
//! The single shared resource between the input bridge and the workers. `push`
//! blocks while the queue is full (backpressure, never drops), `pop` blocks
//! while it is empty, and closing is a one-time transition after which `pop`
//! drains the remaining items and then reports exhaustion.

use crate::error::{PoolError, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;
use tokio::sync::{mpsc, Mutex};

/// Fixed-capacity FIFO buffer of pending task items
pub struct BoundedQueue<T> {
    /// Capacity, immutable after creation
    capacity: usize,
    /// Number of items currently buffered
    depth: AtomicUsize,
    /// Set once by [`close`](Self::close)
    closed: AtomicBool,
    /// Producer half. Dropped on close so consumers drain and then observe
    /// exhaustion; never requires the consumer lock.
    tx: StdMutex<Option<mpsc::Sender<T>>>,
    /// Consumer half, shared by all workers
    rx: Mutex<mpsc::Receiver<T>>,
}

impl<T> BoundedQueue<T> {
    /// Create a queue with the given capacity (floored at 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            capacity,
            depth: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            tx: StdMutex::new(Some(tx)),
            rx: Mutex::new(rx),
        }
    }

    /// Enqueue an item, waiting for space while the queue is full.
    ///
    /// Callers racing this against cancellation may drop the returned future;
    /// an item inside an abandoned `push` is discarded with it.
    pub async fn push(&self, item: T) -> Result<()> {
        let tx = match self.tx.lock().expect("queue sender lock poisoned").clone() {
            Some(tx) => tx,
            None => return Err(PoolError::QueueClosed),
        };
        match tx.send(item).await {
            Ok(()) => {
                self.depth.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Err(_) => Err(PoolError::QueueClosed),
        }
    }

    /// Dequeue the next item in arrival order, waiting while the queue is
    /// empty. Returns `None` once the queue is closed and fully drained.
    ///
    /// Cancel safe: dropping the returned future never loses an item.
    pub async fn pop(&self) -> Option<T> {
        let mut rx = self.rx.lock().await;
        let item = rx.recv().await;
        if item.is_some() {
            self.depth.fetch_sub(1, Ordering::SeqCst);
        }
        item
    }

    /// Close the queue for further enqueue. One-time terminal transition;
    /// already-buffered items remain dequeueable.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.tx.lock().expect("queue sender lock poisoned").take();
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of items currently buffered (point-in-time snapshot)
    pub fn len(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    /// Whether the queue is currently empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed capacity set at creation
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = BoundedQueue::new(4);
        queue.push(1).await.unwrap();
        queue.push(2).await.unwrap();
        queue.push(3).await.unwrap();

        assert_eq!(queue.pop().await, Some(1));
        assert_eq!(queue.pop().await, Some(2));
        assert_eq!(queue.pop().await, Some(3));
    }

    #[tokio::test]
    async fn test_len_tracks_push_and_pop() {
        let queue = BoundedQueue::new(4);
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());

        queue.push(1).await.unwrap();
        queue.push(2).await.unwrap();
        assert_eq!(queue.len(), 2);

        queue.pop().await;
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn test_push_blocks_when_full() {
        let queue = BoundedQueue::new(1);
        queue.push(1).await.unwrap();

        let blocked = tokio::time::timeout(Duration::from_millis(50), queue.push(2)).await;
        assert!(blocked.is_err(), "push into a full queue must block");
    }

    #[tokio::test]
    async fn test_pop_blocks_when_empty() {
        let queue = BoundedQueue::<u32>::new(1);
        let blocked = tokio::time::timeout(Duration::from_millis(50), queue.pop()).await;
        assert!(blocked.is_err(), "pop from an empty open queue must block");
    }

    #[tokio::test]
    async fn test_push_unblocks_after_pop() {
        let queue = Arc::new(BoundedQueue::new(1));
        queue.push(1).await.unwrap();

        let q = queue.clone();
        let pusher = tokio::spawn(async move { q.push(2).await });

        // Let the pusher park on the full queue
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(queue.pop().await, Some(1));

        pusher.await.unwrap().unwrap();
        assert_eq!(queue.pop().await, Some(2));
    }

    #[tokio::test]
    async fn test_close_drains_then_reports_empty() {
        let queue = BoundedQueue::new(4);
        queue.push(1).await.unwrap();
        queue.push(2).await.unwrap();
        queue.close();

        assert!(queue.is_closed());
        assert_eq!(queue.pop().await, Some(1));
        assert_eq!(queue.pop().await, Some(2));
        assert_eq!(queue.pop().await, None);
    }

    #[tokio::test]
    async fn test_push_after_close_fails() {
        let queue = BoundedQueue::new(4);
        queue.close();
        assert!(matches!(queue.push(1).await, Err(PoolError::QueueClosed)));
    }

    #[tokio::test]
    async fn test_close_wakes_parked_consumer() {
        let queue = Arc::new(BoundedQueue::<u32>::new(4));
        let q = queue.clone();
        let consumer = tokio::spawn(async move { q.pop().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.close();

        assert_eq!(consumer.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_capacity_floored_at_one() {
        let queue = BoundedQueue::<u32>::new(0);
        assert_eq!(queue.capacity(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_consumers_each_item_once() {
        let queue = Arc::new(BoundedQueue::new(8));
        for i in 0..8 {
            queue.push(i).await.unwrap();
        }
        queue.close();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let q = queue.clone();
            handles.push(tokio::spawn(async move {
                let mut seen = Vec::new();
                while let Some(item) = q.pop().await {
                    seen.push(item);
                }
                seen
            }));
        }

        let mut all: Vec<u32> = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }
        all.sort_unstable();
        assert_eq!(all, (0..8).collect::<Vec<_>>());
    }
}
