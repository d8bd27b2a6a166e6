//! Press-button intake: the falling-edge ISR path.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up.  The GPIO fires on
//! the falling edge; the ISR runs [`press_edge`], which consults the
//! debounce gate and, for an accepted edge, revokes the blink permit and
//! raises the press signal (requesting a scheduler re-evaluation on the
//! way out).  Rejected edges are switch bounce and do nothing beyond the
//! hardware acknowledge the GPIO service already performed.
//!
//! `press_edge` is a plain function so the exact ISR body also runs on
//! the host, driven by the simulated button in the integration tests.

use crate::debounce::DebounceGate;
use crate::permit::BlinkPermit;
use crate::signal::SignalRaiser;
use crate::Result;

/// The press ISR body.  Non-blocking, allocation-free, O(1).
pub fn press_edge(now_ms: u32, gate: &DebounceGate, permit: &BlinkPermit, raiser: &SignalRaiser) {
    if gate.accept(now_ms) {
        permit.revoke();
        raiser.raise_from_isr();
    }
}

/// Source of debounced press events.
///
/// Implemented by [`PressButton`] on hardware and by the simulated button
/// in the integration tests.
pub trait PressSource: Send {
    /// Register the edge interrupt once at startup, wiring accepted
    /// edges through [`press_edge`] into `raiser`.
    fn attach(
        &mut self,
        gate: &'static DebounceGate,
        permit: &'static BlinkPermit,
        raiser: SignalRaiser,
    ) -> Result<()>;

    /// Re-enable the edge interrupt.  Called by the acknowledge task
    /// before each wait; the GPIO service disarms the interrupt after
    /// every delivery.
    fn rearm(&mut self) -> Result<()>;
}

// ── Hardware button (ESP-IDF) ─────────────────────────────────

#[cfg(target_os = "espidf")]
pub use hw::PressButton;

#[cfg(target_os = "espidf")]
mod hw {
    use esp_idf_hal::gpio::{AnyIOPin, Input, InterruptType, PinDriver, Pull};

    use super::{press_edge, PressSource};
    use crate::debounce::DebounceGate;
    use crate::error::Error;
    use crate::permit::BlinkPermit;
    use crate::signal::SignalRaiser;
    use crate::Result;

    /// The physical call button.
    pub struct PressButton {
        gpio: i32,
        pin: PinDriver<'static, AnyIOPin, Input>,
    }

    impl PressButton {
        /// Configure the button GPIO: input, internal pull-up, falling
        /// edge interrupt.
        pub fn configure(gpio: i32) -> Result<Self> {
            // SAFETY: each GPIO number appears exactly once in `pins`;
            // no other driver claims this pin.
            let any = unsafe { AnyIOPin::new(gpio) };
            let mut pin = PinDriver::input(any)
                .map_err(|e| Error::PinConfig { gpio, code: e.code() })?;
            pin.set_pull(Pull::Up)
                .map_err(|e| Error::PinConfig { gpio, code: e.code() })?;
            pin.set_interrupt_type(InterruptType::NegEdge)
                .map_err(|e| Error::PinConfig { gpio, code: e.code() })?;
            Ok(Self { gpio, pin })
        }
    }

    impl PressSource for PressButton {
        fn attach(
            &mut self,
            gate: &'static DebounceGate,
            permit: &'static BlinkPermit,
            raiser: SignalRaiser,
        ) -> Result<()> {
            let gpio = self.gpio;
            // SAFETY: the callback runs in ISR context and only touches
            // ISR-safe state: the monotonic counter read, the gate and
            // permit atomics, and the notifier raise.
            unsafe {
                self.pin.subscribe(move || {
                    let now_ms =
                        ((esp_idf_svc::sys::esp_timer_get_time()) / 1_000) as u32;
                    press_edge(now_ms, gate, permit, &raiser);
                })
            }
            .map_err(|e| Error::EdgeSubscribe { gpio, code: e.code() })
        }

        fn rearm(&mut self) -> Result<()> {
            let gpio = self.gpio;
            self.pin
                .enable_interrupt()
                .map_err(|e| Error::EdgeArm { gpio, code: e.code() })
        }
    }
}
