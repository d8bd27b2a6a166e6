//! Hardware seams: LED output lines, the press-button intake, and
//! priority-pinned task spawning.

pub mod button;
pub mod led;
pub mod task_pin;
