//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the coordination logic
//! against mock hardware.  All tests run on the host with no real
//! hardware required; ESP-IDF targets compile this crate out.

#![cfg(not(target_os = "espidf"))]

mod coordination_tests;
mod mock_hw;
