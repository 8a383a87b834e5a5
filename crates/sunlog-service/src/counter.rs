//! Process-wide request counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter of service invocations.
///
/// Every service operation increments exactly once at entry, read or write,
/// hit or miss, success or failure. One instance exists per process, shared
/// by both entity services and the REST counter endpoint.
#[derive(Debug, Default)]
pub struct RequestCounter {
    count: AtomicU64,
}

impl RequestCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation. Never fails, never loses an increment:
    /// `fetch_add` is atomic, and a single counter needs no cross-variable
    /// ordering, so `Relaxed` suffices.
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Current count. Reflects every increment that happened before the read.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Resets the count to zero.
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}
