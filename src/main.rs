//! Call-point firmware — main entry point.
//!
//! Bring-up order matters: GPIO lines first, then the acknowledge task
//! (which creates the press signal and registers the edge interrupt
//! itself, reporting back over a one-shot channel), and only once the
//! press intake is confirmed armed, the heartbeat task.  Any setup
//! failure is reported once and aborts startup — the system never runs
//! with a half-wired press path.
//!
//! After startup the main task returns; the two coordination tasks own
//! the board from then on.

use anyhow::{Context, Result};
use log::info;
use std::sync::mpsc;

use callpoint::clock::MonotonicClock;
use callpoint::config::SystemConfig;
use callpoint::debounce::DebounceGate;
use callpoint::drivers::button::PressButton;
use callpoint::drivers::led::LedLine;
use callpoint::drivers::task_pin::{spawn_on_core, Core};
use callpoint::permit::BlinkPermit;
use callpoint::pins;
use callpoint::tasks::{acknowledge, heartbeat};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("callpoint v{} starting", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Shared coordination state ──────────────────────────
    // Created once, passed by reference into the ISR and both tasks,
    // and alive for the whole uptime.
    let gate: &'static DebounceGate = Box::leak(Box::new(DebounceGate::new(config.debounce_ms)));
    let permit: &'static BlinkPermit = Box::leak(Box::new(BlinkPermit::new()));
    let clock: &'static MonotonicClock = Box::leak(Box::new(MonotonicClock::new()));

    // ── 3. GPIO bring-up ──────────────────────────────────────
    let ack_led = LedLine::configure(pins::ACK_LED_GPIO).context("ack LED bring-up")?;
    let heartbeat_led =
        LedLine::configure(pins::HEARTBEAT_LED_GPIO).context("heartbeat LED bring-up")?;
    let button = PressButton::configure(pins::BUTTON_GPIO).context("button bring-up")?;

    // ── 4. Acknowledge task ───────────────────────────────────
    // Spawned first; it owns the press signal and the edge interrupt.
    let (ready_tx, ready_rx) = mpsc::channel();
    spawn_on_core(
        Core::App,
        config.ack_task_priority,
        config.task_stack_kb,
        "ack\0",
        move || acknowledge::run(button, ack_led, gate, permit, clock, ready_tx),
    )?;

    ready_rx
        .recv()
        .context("acknowledge task died during setup")?
        .context("press intake setup")?;
    info!(
        "press intake armed (GPIO{}, {} ms debounce)",
        pins::BUTTON_GPIO,
        config.debounce_ms
    );

    // ── 5. Heartbeat task ─────────────────────────────────────
    let timing = config.heartbeat_timing();
    spawn_on_core(
        Core::App,
        config.heartbeat_task_priority,
        config.task_stack_kb,
        "heartbeat\0",
        move || heartbeat::run(heartbeat_led, permit, timing),
    )?;

    info!("system ready");
    Ok(())
}
