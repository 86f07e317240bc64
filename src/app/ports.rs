//! Port traits: the boundary between the controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PowerController (domain)
//! ```
//!
//! Driven adapters (GPIO lines, the LwM2M client daemon, the logger)
//! implement these traits.  The [`PowerController`](super::controller::PowerController)
//! is generic over them, so the domain core never touches hardware or
//! subprocesses directly.
//!
//! ## Error policy
//!
//! - **GpioPort** errors are fatal: callers propagate them with `?`.
//! - **ResourceReporter** errors are best-effort: callers log and continue.

use crate::error::{GpioError, ReporterError};

use super::events::ControllerEvent;
use super::resource::{ResourceDefinition, ResourcePath};

// ───────────────────────────────────────────────────────────────
// Pin level vocabulary
// ───────────────────────────────────────────────────────────────

/// Binary signal level shared by the button, trigger and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PinState {
    Low = 0,
    High = 1,
}

impl PinState {
    pub fn is_high(self) -> bool {
        self == Self::High
    }

    pub fn is_low(self) -> bool {
        self == Self::Low
    }
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<PinState> for bool {
    fn from(state: PinState) -> Self {
        state.is_high()
    }
}

impl From<PinState> for u8 {
    fn from(state: PinState) -> Self {
        state as u8
    }
}

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain ↔ three digital lines)
// ───────────────────────────────────────────────────────────────

/// The three lines of the board, with fixed polarity.
pub trait GpioPort {
    /// Sample the push-button (HIGH while pressed).
    fn read_button(&mut self) -> Result<PinState, GpioError>;

    /// Drive the relay trigger line.
    fn write_output(&mut self, state: PinState) -> Result<(), GpioError>;

    /// Sample the relay status feedback (HIGH = powered).
    fn read_status(&mut self) -> Result<PinState, GpioError>;
}

// ───────────────────────────────────────────────────────────────
// Resource reporter (driven adapter: domain → device-management server)
// ───────────────────────────────────────────────────────────────

/// Mirrors local state to the remote device-management server.
///
/// Every call is best-effort from the controller's point of view.
pub trait ResourceReporter {
    /// Launch the client session under `endpoint_name`.
    ///
    /// The daemon needs a warm-up period afterwards; the controller waits it
    /// out before issuing any other call.
    fn start_session(&mut self, endpoint_name: &str) -> Result<(), ReporterError>;

    /// Register an object/resource definition with the client.
    fn define_resource(&mut self, definition: &ResourceDefinition) -> Result<(), ReporterError>;

    /// Create an object instance or a resource at `path`.
    fn create_instance(&mut self, path: &ResourcePath) -> Result<(), ReporterError>;

    /// Set a boolean resource value.
    fn set_boolean_resource(&mut self, path: &ResourcePath, value: bool)
    -> Result<(), ReporterError>;

    /// Start watching `path` for changes made on the server side.
    fn subscribe(&mut self, path: &ResourcePath) -> Result<(), ReporterError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`ControllerEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &ControllerEvent);
}
