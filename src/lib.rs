//! Call-point firmware library.
//!
//! Exposes the coordination logic (debounce gate, press signal, blink
//! permit, task bodies) for integration testing and external inspection.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; everything else compiles and runs on the host.

#![deny(unused_must_use)]

pub mod clock;
pub mod config;
pub mod debounce;
pub mod permit;
pub mod pins;
pub mod signal;
pub mod tasks;

pub mod drivers;

mod error;

pub use error::{Error, Result};
