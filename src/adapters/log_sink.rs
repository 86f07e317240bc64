//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to the
//! `log` facade (console via `env_logger` in production).  A supervisor or
//! MQTT adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControllerEvent`] to the console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::Ready { timer_secs } => match timer_secs {
                Some(secs) => info!("READY | timer mode, auto-off after {}s", secs),
                None => info!("READY | toggle mode"),
            },
            ControllerEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            ControllerEvent::PowerToggled { on } => {
                info!("POWER | {}", if *on { "on" } else { "off" });
            }
            ControllerEvent::CountdownTick { remaining_secs } => {
                info!("TIMER | {}s", remaining_secs);
            }
            ControllerEvent::AutoOff => {
                info!("POWER | off (timer expired)");
            }
            ControllerEvent::Recovered { status } => {
                if status.is_high() {
                    info!("RECOVER | relay re-asserted");
                } else {
                    warn!("RECOVER | pulse issued, relay still off");
                }
            }
            ControllerEvent::ExitPowerOff => {
                info!("POWER | off (exit)");
            }
        }
    }
}
