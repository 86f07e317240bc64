//! GPIO line assignments for the MT7688 Duo controller board.
//!
//! Offsets are relative to `gpiochip0`, which covers GPIO 0-31 on the MT7688.
//!
//! Single source of truth: every adapter references this module rather than
//! hard-coding pin numbers.
//!
//! ```text
//!   3V3 ──[button]── GPIO 0     (input, HIGH while pressed)
//!   GPIO 16 ──▶ relay trigger   (output, idles LOW, pulse to flip)
//!   GPIO 17 ◀── relay status    (input, HIGH = conveyor powered)
//!   GND ─────── relay ground
//! ```

// ---------------------------------------------------------------------------
// User button
// ---------------------------------------------------------------------------

/// Momentary push-button wired between 3V3 and this pin.
pub const BUTTON_LINE: u32 = 0;

// ---------------------------------------------------------------------------
// Conveyor power relay (monostable trigger + separate status feedback)
// ---------------------------------------------------------------------------

/// Digital output: a HIGH-then-LOW pulse flips the latched relay.
pub const POWER_TRIGGER_LINE: u32 = 16;
/// Digital input: reports the relay's actual state (HIGH = powered).
pub const POWER_STATUS_LINE: u32 = 17;

// ---------------------------------------------------------------------------
// GPIO character device
// ---------------------------------------------------------------------------

/// Chip holding all three lines.
pub const GPIO_CHIP: &str = "/dev/gpiochip0";
/// Consumer label shown by `gpioinfo` for claimed lines.
pub const GPIO_CONSUMER: &str = "relay-button";
