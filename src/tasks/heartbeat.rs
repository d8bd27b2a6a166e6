//! Heartbeat task — the low-priority idle animator.
//!
//! Free-runs a 1 Hz square wave on the blue heartbeat LED while the
//! blink permit is granted.  When it observes a revoked permit (a press
//! was handled recently) it backs off for a fixed cooldown, then grants
//! the permit again and resumes blinking on its own — nobody tells it to
//! restart.
//!
//! The permit check happens once per cycle, so a pulse already in flight
//! completes before the back-off starts; that bounded lag is part of the
//! contract.  All blocking is in `thread::sleep`, which on ESP-IDF is
//! `vTaskDelay` — each sleep is a preemption point that yields to the
//! acknowledge task.

use std::thread;
use std::time::Duration;

use log::{error, info};

use crate::drivers::led::OutputLine;
use crate::permit::BlinkPermit;

/// Timing for the heartbeat cycle, copied out of the system config at
/// spawn time so the task owns its parameters.
#[derive(Debug, Clone, Copy)]
pub struct HeartbeatTiming {
    /// Back-off after observing a revoked permit (milliseconds).
    pub cooldown_ms: u32,
    /// High / low phase length of the square wave (milliseconds).
    pub half_period_ms: u32,
}

/// Task entry point.  Never returns.
pub fn run<L: OutputLine>(mut led: L, permit: &'static BlinkPermit, timing: HeartbeatTiming) {
    info!(
        "heartbeat started ({} ms half-period, {} ms cooldown)",
        timing.half_period_ms, timing.cooldown_ms
    );

    loop {
        if !permit.is_granted() {
            // A press was handled recently.  Stand down for the full
            // cooldown, then resume unconditionally — the permit write
            // is last-writer-wins by design.
            thread::sleep(Duration::from_millis(u64::from(timing.cooldown_ms)));
            permit.grant();
            info!("no recent presses; resuming idle heartbeat");
        }

        if let Err(e) = led.set_level(true) {
            error!("heartbeat LED write failed: {}", e);
        }
        thread::sleep(Duration::from_millis(u64::from(timing.half_period_ms)));
        if let Err(e) = led.set_level(false) {
            error!("heartbeat LED write failed: {}", e);
        }
        thread::sleep(Duration::from_millis(u64::from(timing.half_period_ms)));
    }
}
