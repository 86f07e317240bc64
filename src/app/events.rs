//! Outbound controller events.
//!
//! The [`PowerController`](super::controller::PowerController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: log to the console, forward to a
//! supervisor, etc.

use super::controller::ControllerState;
use super::ports::PinState;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Start-up finished; the poll loop is about to begin.
    Ready { timer_secs: Option<u32> },

    /// The state machine moved between states.
    StateChanged {
        from: ControllerState,
        to: ControllerState,
    },

    /// A button-triggered pulse completed; `on` is the status read back.
    PowerToggled { on: bool },

    /// One countdown second elapsed; `remaining_secs` counts down to 1.
    CountdownTick { remaining_secs: u32 },

    /// The countdown expired and the auto-off pulse was issued.
    AutoOff,

    /// The relay was found dropped while commanded on and was re-pulsed.
    Recovered { status: PinState },

    /// The exit hook found power on and pulsed it off.
    ExitPowerOff,
}
