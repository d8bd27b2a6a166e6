//! Shared blink permit.
//!
//! A best-effort hint linking the press path to the heartbeat task:
//! revoked (set false) by the press ISR and again by the acknowledge task
//! whenever a press is accepted, granted (set true) by the heartbeat task
//! once its cooldown has elapsed.
//!
//! The permit is read and written from three contexts (ISR, acknowledge
//! task, heartbeat task) without any mutual exclusion — a lock here could
//! block the interrupt path.  All accesses are `Relaxed`: a stale read
//! costs at most one extra blink or cooldown cycle, never a crash or a
//! deadlock.  The double revoke (ISR and acknowledge task) is likewise
//! last-writer-wins with no ordering guarantee.

use core::sync::atomic::{AtomicBool, Ordering};

/// Shared boolean hint: `true` = idle blinking permitted.
pub struct BlinkPermit {
    granted: AtomicBool,
}

impl BlinkPermit {
    /// Boots granted — the heartbeat runs until the first press.
    pub const fn new() -> Self {
        Self {
            granted: AtomicBool::new(true),
        }
    }

    /// Revoke the permit.  ISR-safe (single relaxed store).
    pub fn revoke(&self) {
        self.granted.store(false, Ordering::Relaxed);
    }

    /// Grant the permit.  Called by the heartbeat task after its cooldown.
    pub fn grant(&self) {
        self.granted.store(true, Ordering::Relaxed);
    }

    pub fn is_granted(&self) -> bool {
        self.granted.load(Ordering::Relaxed)
    }
}

impl Default for BlinkPermit {
    fn default() -> Self {
        Self::new()
    }
}
