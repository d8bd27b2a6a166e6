//! Wraparound-safe debounce gate for the press interrupt.
//!
//! A mechanical switch produces a burst of edges per actuation.  The gate
//! accepts an edge only when more than [`threshold`](DebounceGate::threshold_ms)
//! milliseconds have elapsed since the previously accepted edge, measured
//! with modular `u32` arithmetic so the decision stays correct across the
//! millisecond counter wrapping (every ~49.7 days).
//!
//! The gate is consulted exclusively from the press ISR: `accept` is O(1),
//! allocation-free and non-blocking.

use core::sync::atomic::{AtomicU32, Ordering};

/// Edge filter keyed on the timestamp of the last accepted edge.
pub struct DebounceGate {
    /// Timestamp of the last accepted edge (wrapping milliseconds).
    /// The press ISR is the only reader and writer, so `Relaxed` suffices;
    /// the atomic exists because the gate is shared by reference with the
    /// ISR closure.
    last_accepted_ms: AtomicU32,
    threshold_ms: u32,
}

impl DebounceGate {
    /// A fresh gate accepts the very first edge no matter where the
    /// millisecond counter happens to be: the stored timestamp is seeded
    /// one past the threshold into the past.
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            last_accepted_ms: AtomicU32::new(0u32.wrapping_sub(threshold_ms.wrapping_add(1))),
            threshold_ms,
        }
    }

    /// Accept or reject the edge that just fired.
    ///
    /// Returns `true` (and records `now_ms`) when the edge falls outside
    /// the suppression window following the previous accepted edge.
    pub fn accept(&self, now_ms: u32) -> bool {
        let last = self.last_accepted_ms.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last) > self.threshold_ms {
            self.last_accepted_ms.store(now_ms, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    pub fn threshold_ms(&self) -> u32 {
        self.threshold_ms
    }
}
