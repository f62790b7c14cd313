//! Flush scheduling for snapshot writes.
//!
//! Persisting the full document on every mutation couples event
//! throughput to storage latency; under like bursts that is the system's
//! backpressure point. The debounced policy keeps the in-memory ledger
//! authoritative and bounds crash loss to the debounce window instead.
//! Read semantics are unaffected either way: queries always serve the
//! in-memory ledger.

use std::time::Duration;

/// When the apply loop writes the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Write after every applied event. Maximum durability, throughput
    /// bounded by storage latency.
    EveryMutation,
    /// Mark dirty on apply; a periodic timer performs the write. Crash
    /// loss is bounded by the interval. Shutdown always flushes.
    Debounced(Duration),
}

impl FlushPolicy {
    /// Build a policy from a configured interval in milliseconds.
    ///
    /// `0` selects [`FlushPolicy::EveryMutation`].
    pub const fn from_interval_ms(interval_ms: u64) -> Self {
        if interval_ms == 0 {
            Self::EveryMutation
        } else {
            Self::Debounced(Duration::from_millis(interval_ms))
        }
    }

    /// Whether a write should happen immediately after an apply.
    pub const fn flush_on_mutation(self) -> bool {
        matches!(self, Self::EveryMutation)
    }

    /// The timer interval driving deferred writes, if any.
    pub const fn interval(self) -> Option<Duration> {
        match self {
            Self::EveryMutation => None,
            Self::Debounced(interval) => Some(interval),
        }
    }
}
