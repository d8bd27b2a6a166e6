//! Mock hardware for integration tests.
//!
//! Recording LED lines capture every level transition with a wall-clock
//! timestamp, and the simulated button drives edges through the exact
//! ISR body (`press_edge`) the hardware uses — so the tests exercise the
//! real task functions on real threads without touching GPIO registers.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use callpoint::debounce::DebounceGate;
use callpoint::drivers::button::{press_edge, PressSource};
use callpoint::drivers::led::OutputLine;
use callpoint::permit::BlinkPermit;
use callpoint::signal::SignalRaiser;
use callpoint::Result;

// ── Recording LED line ────────────────────────────────────────

type Transitions = Arc<Mutex<Vec<(Instant, bool)>>>;

/// Output line handed to a task; every write is recorded.
pub struct RecordingLine {
    transitions: Transitions,
}

/// Test-side view of a recording line's history.
#[derive(Clone)]
pub struct LineTrace {
    transitions: Transitions,
}

impl RecordingLine {
    pub fn new() -> (Self, LineTrace) {
        let transitions: Transitions = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                transitions: Arc::clone(&transitions),
            },
            LineTrace { transitions },
        )
    }
}

impl OutputLine for RecordingLine {
    fn set_level(&mut self, high: bool) -> Result<()> {
        self.transitions
            .lock()
            .unwrap()
            .push((Instant::now(), high));
        Ok(())
    }
}

#[allow(dead_code)]
impl LineTrace {
    pub fn snapshot(&self) -> Vec<(Instant, bool)> {
        self.transitions.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.transitions.lock().unwrap().len()
    }

    /// Transitions recorded inside the half-open window `[from, to)`.
    pub fn count_between(&self, from: Instant, to: Instant) -> usize {
        self.snapshot()
            .iter()
            .filter(|(t, _)| *t >= from && *t < to)
            .count()
    }

    /// Level of the most recent write, if any.
    pub fn last_level(&self) -> Option<bool> {
        self.snapshot().last().map(|(_, high)| *high)
    }

    /// True when the recorded levels strictly alternate, starting high.
    pub fn alternates_from_high(&self) -> bool {
        self.snapshot()
            .iter()
            .enumerate()
            .all(|(i, (_, high))| *high == (i % 2 == 0))
    }
}

// ── Simulated press button ────────────────────────────────────

struct Wiring {
    gate: &'static DebounceGate,
    permit: &'static BlinkPermit,
    raiser: SignalRaiser,
}

type SharedWiring = Arc<Mutex<Option<Wiring>>>;

/// Press source handed to the acknowledge task.
pub struct SimButton {
    wiring: SharedWiring,
}

/// Test-side injector of falling edges.
pub struct PressInjector {
    wiring: SharedWiring,
}

impl SimButton {
    pub fn new() -> (Self, PressInjector) {
        let wiring: SharedWiring = Arc::new(Mutex::new(None));
        (
            Self {
                wiring: Arc::clone(&wiring),
            },
            PressInjector { wiring },
        )
    }
}

impl PressSource for SimButton {
    fn attach(
        &mut self,
        gate: &'static DebounceGate,
        permit: &'static BlinkPermit,
        raiser: SignalRaiser,
    ) -> Result<()> {
        *self.wiring.lock().unwrap() = Some(Wiring {
            gate,
            permit,
            raiser,
        });
        Ok(())
    }

    fn rearm(&mut self) -> Result<()> {
        Ok(())
    }
}

impl PressInjector {
    /// Fire one falling edge, timestamped `now_ms` on the simulated
    /// millisecond clock, through the same path the hardware ISR takes.
    pub fn press(&self, now_ms: u32) {
        let wiring = self.wiring.lock().unwrap();
        let w = wiring.as_ref().expect("press injected before attach");
        press_edge(now_ms, w.gate, w.permit, &w.raiser);
    }
}
