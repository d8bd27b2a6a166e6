//! GPIO pin assignments for the call-point main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Green acknowledge LED — toggled once per accepted button press.
pub const ACK_LED_GPIO: i32 = 2;

/// Blue heartbeat LED — square-wave idle indicator, driven by the
/// heartbeat task whenever no press has been handled recently.
pub const HEARTBEAT_LED_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Call button (active-low momentary, internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button.  Falling edge fires the press interrupt.
pub const BUTTON_GPIO: i32 = 25;
