//! Latched conveyor power relay.
//!
//! The relay is monostable-triggered: the trigger GPIO idles LOW and a short
//! HIGH pulse flips the latched contact.  The trigger line therefore says
//! nothing about whether power is on; only the separate status GPIO does.
//! Every mutation is pulse-then-read, never write-then-trust.
//!
//! ```text
//!  trigger  ──────┐▔▔▔▔▔▔┌──────────
//!                 │<-w->│
//!  status   ═════════════╪═ read ═══
//! ```

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{GpioPort, PinState};
use crate::error::GpioError;

pub struct RelayDriver {
    pulse_width_ms: u32,
}

impl RelayDriver {
    pub fn new(pulse_width_ms: u32) -> Self {
        Self { pulse_width_ms }
    }

    /// Park the trigger line LOW (its idle level).
    pub fn release(&self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        gpio.write_output(PinState::Low)
    }

    /// Drive one trigger pulse and return the status line read afterwards.
    pub fn pulse(
        &self,
        gpio: &mut impl GpioPort,
        delay: &mut impl DelayNs,
    ) -> Result<PinState, GpioError> {
        gpio.write_output(PinState::High)?;
        delay.delay_ms(self.pulse_width_ms);
        gpio.write_output(PinState::Low)?;
        let status = gpio.read_status()?;
        debug!("relay: pulse {}ms, status={:?}", self.pulse_width_ms, status);
        Ok(status)
    }
}
