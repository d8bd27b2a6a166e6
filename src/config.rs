//! System configuration parameters
//!
//! All tunable parameters for the call-point coordination logic.  Defaults
//! match the production board; the integration tests substitute scaled-down
//! timings to keep wall-clock runtime short.

use serde::{Deserialize, Serialize};

use crate::tasks::heartbeat::HeartbeatTiming;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Press intake ---
    /// Suppression window after an accepted press (milliseconds).  Edges
    /// arriving inside the window are treated as switch bounce.
    pub debounce_ms: u32,

    // --- Heartbeat ---
    /// Back-off after user activity before the heartbeat resumes
    /// (milliseconds).
    pub cooldown_ms: u32,
    /// Half-period of the heartbeat square wave (milliseconds).  500 ms
    /// high + 500 ms low gives the 1 Hz idle blink.
    pub blink_half_period_ms: u32,

    // --- Task layout ---
    /// FreeRTOS priority of the acknowledge task.  Must be strictly above
    /// the heartbeat priority so an accepted press always preempts the
    /// idle blink.
    pub ack_task_priority: u8,
    /// FreeRTOS priority of the heartbeat task.
    pub heartbeat_task_priority: u8,
    /// Stack size for both coordination tasks (KiB).
    pub task_stack_kb: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Press intake
            debounce_ms: 200,

            // Heartbeat
            cooldown_ms: 2000,
            blink_half_period_ms: 500,

            // Task layout
            ack_task_priority: 10,
            heartbeat_task_priority: 5,
            task_stack_kb: 16,
        }
    }
}

impl SystemConfig {
    /// The subset of parameters the heartbeat task needs, copied out so
    /// the task owns its timing without sharing the whole config.
    pub fn heartbeat_timing(&self) -> HeartbeatTiming {
        HeartbeatTiming {
            cooldown_ms: self.cooldown_ms,
            half_period_ms: self.blink_half_period_ms,
        }
    }
}
