//! Pool configuration — worker bounds, queue sizing, and scaling knobs
//!
//! Configuration is corrected rather than rejected: out-of-range values are
//! clamped to their floors when the pool is created, so construction never
//! fails.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Floor applied to `min_workers` and `max_workers`
pub const MIN_WORKERS_FLOOR: usize = 1;

/// Floor applied to `queue_capacity`
pub const MIN_QUEUE_CAPACITY: usize = 1;

/// Idle timeout used when none is configured
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Floor for explicitly configured idle timeouts. A zero timeout would make
/// the idle evaluation spin instead of waiting.
pub const MIN_IDLE_TIMEOUT: Duration = Duration::from_millis(1);

/// Default interval between scaling controller ticks
pub const DEFAULT_SCALE_INTERVAL: Duration = Duration::from_secs(2);

/// Configuration for a [`WorkerPool`](crate::WorkerPool) — immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Minimum number of workers kept alive (default: 1)
    #[serde(default = "default_min_workers")]
    pub min_workers: usize,

    /// Maximum number of workers (default: 4; raised to `min_workers` if smaller)
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Capacity of the internal task queue (default: 64)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Queue fill percentage (1..=100) above which the scaling controller adds
    /// workers (default: 75)
    #[serde(default = "default_scale_threshold")]
    pub scale_threshold: u32,

    /// How long a worker above the floor may wait without receiving work
    /// before it retires. `None` uses [`DEFAULT_IDLE_TIMEOUT`]; an explicit
    /// value is honored as given, floored only at [`MIN_IDLE_TIMEOUT`].
    #[serde(default)]
    pub idle_timeout: Option<Duration>,

    /// Interval between scaling evaluations (default: 2s)
    #[serde(default = "default_scale_interval")]
    pub scale_interval: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_workers: default_min_workers(),
            max_workers: default_max_workers(),
            queue_capacity: default_queue_capacity(),
            scale_threshold: default_scale_threshold(),
            idle_timeout: None,
            scale_interval: default_scale_interval(),
        }
    }
}

impl PoolConfig {
    /// Clamp all fields to their documented floors and ranges.
    ///
    /// Called once at pool creation; malformed inputs are corrected, never
    /// rejected.
    pub(crate) fn normalized(mut self) -> Self {
        self.min_workers = self.min_workers.max(MIN_WORKERS_FLOOR);
        self.max_workers = self.max_workers.max(self.min_workers);
        self.queue_capacity = self.queue_capacity.max(MIN_QUEUE_CAPACITY);
        self.scale_threshold = self.scale_threshold.clamp(1, 100);
        if let Some(timeout) = self.idle_timeout {
            self.idle_timeout = Some(timeout.max(MIN_IDLE_TIMEOUT));
        }
        self
    }

    /// The idle timeout workers actually wait on
    pub fn effective_idle_timeout(&self) -> Duration {
        self.idle_timeout.unwrap_or(DEFAULT_IDLE_TIMEOUT)
    }
}

fn default_min_workers() -> usize {
    1
}

fn default_max_workers() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    64
}

fn default_scale_threshold() -> u32 {
    75
}

fn default_scale_interval() -> Duration {
    DEFAULT_SCALE_INTERVAL
}
