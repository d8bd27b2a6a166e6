//! Unified error types for the call-point firmware.
//!
//! A single `Error` enum that every fallible subsystem converts into,
//! keeping startup error handling uniform.  All variants are `Copy` so
//! they can be passed across the task setup channel without allocation.
//!
//! Setup failures (pin configuration, edge-interrupt subscription, task
//! spawn) are fatal to coordinated mode: the binary reports them once and
//! does not start the dependent tasks.  A press filtered by the debounce
//! gate is not an error and never appears here.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// GPIO direction/pull configuration failed during bring-up.
    PinConfig { gpio: i32, code: i32 },
    /// Edge-interrupt subscription failed during bring-up.
    EdgeSubscribe { gpio: i32, code: i32 },
    /// Re-enabling the press interrupt after a handled press failed.
    EdgeArm { gpio: i32, code: i32 },
    /// A level write to an output line failed.
    LineWrite { gpio: i32, code: i32 },
    /// A coordination task could not be spawned.
    TaskSpawn { name: &'static str },
}

impl Error {
    /// True for failures that must abort startup rather than be logged
    /// and ridden out at runtime.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            Self::PinConfig { .. } | Self::EdgeSubscribe { .. } | Self::TaskSpawn { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinConfig { gpio, code } => {
                write!(f, "GPIO{} config failed (rc={})", gpio, code)
            }
            Self::EdgeSubscribe { gpio, code } => {
                write!(f, "GPIO{} edge subscribe failed (rc={})", gpio, code)
            }
            Self::EdgeArm { gpio, code } => {
                write!(f, "GPIO{} interrupt re-arm failed (rc={})", gpio, code)
            }
            Self::LineWrite { gpio, code } => {
                write!(f, "GPIO{} level write failed (rc={})", gpio, code)
            }
            Self::TaskSpawn { name } => write!(f, "task '{}' spawn failed", name),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
