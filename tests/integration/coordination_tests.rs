//! End-to-end coordination scenarios.
//!
//! The real task functions run on real threads with the host press
//! signal; the tests inject edges through the ISR body and assert on the
//! recorded LED transitions.  Timings are scaled down (60 ms debounce,
//! 600 ms cooldown, 60 ms half-period) and every window assertion keeps
//! a wide margin for scheduler jitter.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use callpoint::clock::MonotonicClock;
use callpoint::config::SystemConfig;
use callpoint::debounce::DebounceGate;
use callpoint::drivers::button::PressSource;
use callpoint::drivers::task_pin::{spawn_on_core, Core};
use callpoint::permit::BlinkPermit;
use callpoint::signal::SignalRaiser;
use callpoint::tasks::{acknowledge, heartbeat};
use callpoint::{Error, Result};

use crate::mock_hw::{LineTrace, PressInjector, RecordingLine, SimButton};

fn test_config() -> SystemConfig {
    SystemConfig {
        debounce_ms: 60,
        cooldown_ms: 600,
        blink_half_period_ms: 60,
        ack_task_priority: 10,
        heartbeat_task_priority: 5,
        task_stack_kb: 256,
    }
}

struct Rig {
    injector: PressInjector,
    ack: LineTrace,
    heartbeat: LineTrace,
    permit: &'static BlinkPermit,
}

/// Bring up both tasks the way the binary does: acknowledge first, wait
/// for its setup report, then the heartbeat.
fn start_rig(config: &SystemConfig) -> Rig {
    let gate: &'static DebounceGate = Box::leak(Box::new(DebounceGate::new(config.debounce_ms)));
    let permit: &'static BlinkPermit = Box::leak(Box::new(BlinkPermit::new()));
    let clock: &'static MonotonicClock = Box::leak(Box::new(MonotonicClock::new()));

    let (ack_line, ack_trace) = RecordingLine::new();
    let (hb_line, hb_trace) = RecordingLine::new();
    let (button, injector) = SimButton::new();

    let (ready_tx, ready_rx) = mpsc::channel();
    spawn_on_core(
        Core::App,
        config.ack_task_priority,
        config.task_stack_kb,
        "ack\0",
        move || acknowledge::run(button, ack_line, gate, permit, clock, ready_tx),
    )
    .expect("spawn acknowledge task");
    ready_rx
        .recv()
        .expect("acknowledge task setup report")
        .expect("press intake setup");

    let timing = config.heartbeat_timing();
    spawn_on_core(
        Core::App,
        config.heartbeat_task_priority,
        config.task_stack_kb,
        "heartbeat\0",
        move || heartbeat::run(hb_line, permit, timing),
    )
    .expect("spawn heartbeat task");

    Rig {
        injector,
        ack: ack_trace,
        heartbeat: hb_trace,
        permit,
    }
}

fn sleep_until(t0: Instant, offset: Duration) {
    let elapsed = t0.elapsed();
    if offset > elapsed {
        std::thread::sleep(offset - elapsed);
    }
}

// ── Acknowledge path ──────────────────────────────────────────

#[test]
fn bounced_press_toggles_the_ack_led_once() {
    let rig = start_rig(&test_config());

    // Two edges 40 ms apart on the simulated clock: the second is bounce.
    rig.injector.press(1_000);
    rig.injector.press(1_040);

    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(rig.ack.len(), 1, "only the first edge is a press");
    assert_eq!(rig.ack.last_level(), Some(true));
}

#[test]
fn two_spaced_presses_return_the_ack_led_to_its_original_state() {
    let rig = start_rig(&test_config());

    rig.injector.press(1_000);
    std::thread::sleep(Duration::from_millis(150));
    rig.injector.press(1_250);

    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(rig.ack.len(), 2);
    assert_eq!(rig.ack.last_level(), Some(false), "on, then off again");
}

#[test]
fn ack_led_never_moves_without_a_press() {
    let rig = start_rig(&test_config());
    std::thread::sleep(Duration::from_millis(400));
    assert_eq!(rig.ack.len(), 0);
}

// ── Heartbeat path ────────────────────────────────────────────

#[test]
fn heartbeat_free_runs_a_square_wave_while_idle() {
    let rig = start_rig(&test_config());

    std::thread::sleep(Duration::from_millis(700));
    let writes = rig.heartbeat.snapshot();
    assert!(
        writes.len() >= 4,
        "expected a free-running blink, saw {} writes",
        writes.len()
    );
    assert!(rig.heartbeat.alternates_from_high());
    // Each phase lasts a full half-period; sleeps only ever overshoot.
    for pair in writes.windows(2) {
        let gap = pair[1].0.duration_since(pair[0].0);
        assert!(
            gap >= Duration::from_millis(40),
            "phase shorter than the half-period: {:?}",
            gap
        );
    }
    assert!(rig.permit.is_granted());
}

#[test]
fn press_suspends_the_heartbeat_for_one_cooldown_then_resumes() {
    let config = test_config();
    let rig = start_rig(&config);

    // Let the heartbeat establish itself, then press.
    std::thread::sleep(Duration::from_millis(150));
    let t0 = Instant::now();
    rig.injector.press(5_000);

    // The ISR path revokes the permit synchronously.
    assert!(!rig.permit.is_granted(), "permit must drop with the press");

    // Cooldown (600 ms) elapses; the heartbeat grants the permit itself.
    sleep_until(t0, Duration::from_millis(1_000));
    assert!(
        rig.permit.is_granted(),
        "heartbeat must grant the permit after its cooldown"
    );

    sleep_until(t0, Duration::from_millis(1_600));

    // Quiet window: after the in-flight pulse drains (≤ ~120 ms) and
    // before the cooldown ends (≥ 600 ms) the line must not move.
    let quiet = rig
        .heartbeat
        .count_between(t0 + Duration::from_millis(200), t0 + Duration::from_millis(550));
    assert_eq!(quiet, 0, "heartbeat must stand down during the cooldown");

    // And it resumes on its own afterwards.
    let resumed = rig
        .heartbeat
        .count_between(t0 + Duration::from_millis(600), t0 + Duration::from_millis(1_600));
    assert!(
        resumed >= 2,
        "heartbeat must resume after the cooldown, saw {} writes",
        resumed
    );
}

// ── Setup failure path ────────────────────────────────────────

/// Press source whose interrupt subscription always fails.
struct BrokenButton;

impl PressSource for BrokenButton {
    fn attach(
        &mut self,
        _gate: &'static DebounceGate,
        _permit: &'static BlinkPermit,
        _raiser: SignalRaiser,
    ) -> Result<()> {
        Err(Error::EdgeSubscribe { gpio: 25, code: -1 })
    }

    fn rearm(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn failed_intake_setup_is_reported_and_the_task_refrains_from_running() {
    let config = test_config();
    let gate: &'static DebounceGate = Box::leak(Box::new(DebounceGate::new(config.debounce_ms)));
    let permit: &'static BlinkPermit = Box::leak(Box::new(BlinkPermit::new()));
    let clock: &'static MonotonicClock = Box::leak(Box::new(MonotonicClock::new()));
    let (ack_line, ack_trace) = RecordingLine::new();

    let (ready_tx, ready_rx) = mpsc::channel();
    let handle = spawn_on_core(Core::App, config.ack_task_priority, 256, "ack\0", move || {
        acknowledge::run(BrokenButton, ack_line, gate, permit, clock, ready_tx)
    })
    .expect("spawn acknowledge task");

    let report = ready_rx.recv().expect("setup report");
    assert_eq!(report, Err(Error::EdgeSubscribe { gpio: 25, code: -1 }));

    // The task exits instead of entering its wait loop.
    handle.join().expect("task returns cleanly after setup failure");
    assert_eq!(ack_trace.len(), 0);
}
