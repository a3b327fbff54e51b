//! Centralized error types for scalepool
//!
//! Construction corrects malformed configuration instead of rejecting it, and
//! work-function failures are the work function's own concern, so the error
//! surface is small: only the queue's closed state is reportable.

use thiserror::Error;

/// Pool error types
#[derive(Debug, Error)]
pub enum PoolError {
    /// The task queue was closed and no longer accepts items
    #[error("task queue is closed")]
    QueueClosed,
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PoolError>;
