//! Indicator LED output lines.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: each LED is a push-pull GPIO output.  On host/test: the
//! integration tests substitute recording lines behind the same trait.

use crate::Result;

/// One digital output line, owned exclusively by a single task.
pub trait OutputLine: Send {
    /// Drive the line high or low.  A failed write is surfaced to the
    /// owning task, which logs it; there is no recovery at this layer.
    fn set_level(&mut self, high: bool) -> Result<()>;
}

#[cfg(target_os = "espidf")]
pub use hw::LedLine;

#[cfg(target_os = "espidf")]
mod hw {
    use esp_idf_hal::gpio::{AnyOutputPin, Level, Output, PinDriver};

    use super::OutputLine;
    use crate::error::Error;
    use crate::Result;

    /// A GPIO-backed indicator LED, initially driven low.
    pub struct LedLine {
        gpio: i32,
        pin: PinDriver<'static, AnyOutputPin, Output>,
    }

    impl LedLine {
        pub fn configure(gpio: i32) -> Result<Self> {
            // SAFETY: each GPIO number appears exactly once in `pins`;
            // no other driver claims this pin.
            let any = unsafe { AnyOutputPin::new(gpio) };
            let mut pin = PinDriver::output(any)
                .map_err(|e| Error::PinConfig { gpio, code: e.code() })?;
            pin.set_low()
                .map_err(|e| Error::PinConfig { gpio, code: e.code() })?;
            Ok(Self { gpio, pin })
        }
    }

    impl OutputLine for LedLine {
        fn set_level(&mut self, high: bool) -> Result<()> {
            let level = if high { Level::High } else { Level::Low };
            self.pin.set_level(level).map_err(|e| Error::LineWrite {
                gpio: self.gpio,
                code: e.code(),
            })
        }
    }
}
