//! Acknowledge task — the high-priority press responder.
//!
//! Blocks on the press signal; per accepted press it toggles the green
//! acknowledge LED, revokes the blink permit so the heartbeat backs off,
//! and goes back to waiting.  Runs at the higher of the two task
//! priorities so it always preempts the heartbeat when a real press
//! arrives.
//!
//! The task creates the press signal itself (FreeRTOS task notifications
//! belong to the waiting task) and registers the edge interrupt, then
//! reports the setup outcome to the binary over a one-shot channel.  On
//! setup failure it reports and returns without entering the wait loop;
//! after a successful setup it never terminates.

use std::sync::mpsc::Sender;

use heapless::HistoryBuffer;
use log::{debug, error, info};

use crate::clock::MonotonicClock;
use crate::debounce::DebounceGate;
use crate::drivers::button::PressSource;
use crate::drivers::led::OutputLine;
use crate::permit::BlinkPermit;
use crate::signal::EventSignal;
use crate::Result;

/// How many accepted-press timestamps the statistics window keeps.
const HISTORY_DEPTH: usize = 16;

/// Rolling record of accepted presses, owned by the acknowledge task.
pub struct PressHistory {
    timestamps_ms: HistoryBuffer<u32, HISTORY_DEPTH>,
    total: u32,
}

impl PressHistory {
    pub fn new() -> Self {
        Self {
            timestamps_ms: HistoryBuffer::new(),
            total: 0,
        }
    }

    pub fn record(&mut self, now_ms: u32) {
        self.timestamps_ms.write(now_ms);
        self.total = self.total.wrapping_add(1);
    }

    /// Accepted presses since boot.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Mean interval between the recorded presses, wraparound-safe.
    /// `None` until at least two presses have been recorded.
    pub fn mean_interval_ms(&self) -> Option<u32> {
        let ordered: heapless::Vec<u32, HISTORY_DEPTH> =
            self.timestamps_ms.oldest_ordered().copied().collect();
        if ordered.len() < 2 {
            return None;
        }
        let sum: u64 = ordered
            .windows(2)
            .map(|pair| u64::from(pair[1].wrapping_sub(pair[0])))
            .sum();
        Some((sum / (ordered.len() as u64 - 1)) as u32)
    }
}

impl Default for PressHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Task entry point.
///
/// `ready` receives exactly one message: `Ok(())` once the press intake
/// is armed, or the setup error.  The binary must not start the
/// heartbeat task until it has seen the `Ok`.
pub fn run<B: PressSource, L: OutputLine>(
    mut button: B,
    mut led: L,
    gate: &'static DebounceGate,
    permit: &'static BlinkPermit,
    clock: &'static MonotonicClock,
    ready: Sender<Result<()>>,
) {
    let (signal, raiser) = EventSignal::new();

    if let Err(e) = button.attach(gate, permit, raiser) {
        error!("press intake setup failed: {}", e);
        let _ = ready.send(Err(e));
        return;
    }
    let _ = ready.send(Ok(()));

    let mut led_on = false;
    let mut history = PressHistory::new();

    loop {
        if let Err(e) = button.rearm() {
            error!("press interrupt re-arm failed: {}", e);
        }
        signal.take();

        // Accepted press: toggle the acknowledge LED, then make sure the
        // heartbeat stands down.  The ISR already revoked the permit;
        // this second revoke is deliberate redundancy, last-writer-wins.
        led_on = !led_on;
        if let Err(e) = led.set_level(led_on) {
            error!("ack LED write failed: {}", e);
        }
        permit.revoke();

        history.record(clock.now_ms());
        info!(
            "press #{} acknowledged; ack LED now {}",
            history.total(),
            if led_on { "on" } else { "off" }
        );
        if let Some(mean) = history.mean_interval_ms() {
            debug!("mean press interval {} ms", mean);
        }
    }
}
