//! GPIO adapter: the board's three lines behind [`GpioPort`].
//!
//! Lines are claimed from the kernel's GPIO character device with
//! `gpio-cdev`.  On the MT7688 all three sit on `gpiochip0`:
//!
//! ```text
//!   /dev/gpiochip0  line 0   button   INPUT
//!                   line 16  trigger  OUTPUT, requested LOW
//!                   line 17  status   INPUT
//! ```
//!
//! The kernel releases every line when [`CdevBank`] is dropped.

use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use log::{debug, info};

use crate::app::ports::{GpioPort, PinState};
use crate::config::GpioConfig;
use crate::error::{GpioError, Line};
use crate::pins;

/// Line handles for the button, trigger and status lines.
pub struct CdevBank {
    button: LineHandle,
    trigger: LineHandle,
    status: LineHandle,
}

impl CdevBank {
    /// Open the chip and claim all three lines.  The trigger is requested
    /// as an output already driven LOW, so it never glitches HIGH.
    pub fn open(config: &GpioConfig) -> Result<Self, GpioError> {
        let mut chip = Chip::new(&config.chip).map_err(|e| GpioError::ChipUnavailable {
            chip: config.chip.clone(),
            cause: e.to_string(),
        })?;

        let button = request(
            &mut chip,
            Line::Button,
            config.button_line,
            LineRequestFlags::INPUT,
        )?;
        let trigger = request(
            &mut chip,
            Line::PowerTrigger,
            config.trigger_line,
            LineRequestFlags::OUTPUT,
        )?;
        let status = request(
            &mut chip,
            Line::PowerStatus,
            config.status_line,
            LineRequestFlags::INPUT,
        )?;

        info!(
            "gpio: {} button={} trigger={} status={}",
            config.chip, config.button_line, config.trigger_line, config.status_line
        );
        Ok(Self {
            button,
            trigger,
            status,
        })
    }
}

fn request(
    chip: &mut Chip,
    line: Line,
    offset: u32,
    flags: LineRequestFlags,
) -> Result<LineHandle, GpioError> {
    let handle = chip
        .get_line(offset)
        .and_then(|l| l.request(flags, u8::from(PinState::Low), pins::GPIO_CONSUMER))
        .map_err(|e| GpioError::Setup {
            line,
            cause: format!("line {offset}: {e}"),
        })?;
    debug!("gpio: {} claimed line {}", line, offset);
    Ok(handle)
}

/// Any non-zero value the kernel reports is HIGH.
fn level(raw: u8) -> PinState {
    PinState::from(raw != 0)
}

fn read(handle: &LineHandle, line: Line) -> Result<PinState, GpioError> {
    handle
        .get_value()
        .map(level)
        .map_err(|e| GpioError::ReadFailed {
            line,
            cause: e.to_string(),
        })
}

impl GpioPort for CdevBank {
    fn read_button(&mut self) -> Result<PinState, GpioError> {
        read(&self.button, Line::Button)
    }

    fn write_output(&mut self, state: PinState) -> Result<(), GpioError> {
        self.trigger
            .set_value(u8::from(state))
            .map_err(|e| GpioError::WriteFailed {
                line: Line::PowerTrigger,
                cause: e.to_string(),
            })
    }

    fn read_status(&mut self) -> Result<PinState, GpioError> {
        read(&self.status, Line::PowerStatus)
    }
}
